//! Command definitions
//!
//! Typed commands and their parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TelloError};

// =============================================================================
// Numeric Parameters
// =============================================================================

/// A numeric parameter, kept in the form the caller supplied it
///
/// Integers render without a fractional part; floats render with Rust's
/// shortest representation, so `100.0` renders as `100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Value as f64 for range comparisons
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// False for NaN and infinities
    pub fn is_finite(self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(v: $t) -> Self {
                Number::Int(v as i64)
            }
        })*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    /// Goes through the f32's shortest decimal form so `20.1f32` stays `20.1`
    fn from(v: f32) -> Self {
        Number::Float(v.to_string().parse().unwrap_or(v as f64))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

/// Parse caller text into a number
///
/// Anything that is not an integer or a finite decimal fails with
/// `NotANumber`, which is distinct from a number outside its range.
pub fn parse_number(param: &'static str, input: &str) -> Result<Number> {
    let trimmed = input.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(Number::Int(v));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Number::Float(v)),
        _ => Err(TelloError::NotANumber {
            param,
            input: input.to_string(),
        }),
    }
}

/// Inclusive legal interval for a numeric parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub param: &'static str,
    pub min: i64,
    pub max: i64,
}

/// Distance to fly, in centimeters
pub const DISTANCE_RANGE: Range = Range { param: "distance (cm)", min: 20, max: 500 };

/// Rotation angle, in degrees
pub const ANGLE_RANGE: Range = Range { param: "angle (degrees)", min: 1, max: 360 };

/// Flight speed, in cm/s
pub const SPEED_RANGE: Range = Range { param: "speed (cm/s)", min: 10, max: 100 };

/// Distance a control surface starts with
pub const DEFAULT_DISTANCE_CM: i64 = 20;

/// Angle a control surface starts with
pub const DEFAULT_ANGLE_DEGREES: i64 = 45;

impl Range {
    /// Both bounds are legal
    pub fn contains(&self, value: Number) -> bool {
        let v = value.as_f64();
        v >= self.min as f64 && v <= self.max as f64
    }

    /// Check a value, reporting which failure kind applies
    pub fn check(&self, value: Number) -> Result<Number> {
        if !value.is_finite() {
            return Err(TelloError::NotANumber {
                param: self.param,
                input: value.to_string(),
            });
        }
        if !self.contains(value) {
            return Err(TelloError::OutOfRange {
                param: self.param,
                value: value.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    /// Pull a value into range (control surface convenience, not validation)
    pub fn clamp(&self, value: Number) -> Number {
        let v = value.as_f64();
        if !value.is_finite() || v < self.min as f64 {
            Number::Int(self.min)
        } else if v > self.max as f64 {
            Number::Int(self.max)
        } else {
            value
        }
    }
}

// =============================================================================
// Directions
// =============================================================================

/// Translation direction for the distance commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Back,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 6] = [
        MoveDirection::Up,
        MoveDirection::Down,
        MoveDirection::Left,
        MoveDirection::Right,
        MoveDirection::Forward,
        MoveDirection::Back,
    ];

    /// Wire verb for this direction
    pub fn token(self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
            MoveDirection::Forward => "forward",
            MoveDirection::Back => "back",
        }
    }
}

impl FromStr for MoveDirection {
    type Err = TelloError;

    fn from_str(s: &str) -> Result<Self> {
        MoveDirection::ALL
            .into_iter()
            .find(|d| d.token() == s)
            .ok_or_else(|| TelloError::InvalidDirection(s.to_string()))
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Wire verb for this direction
    pub fn token(self) -> &'static str {
        match self {
            RotateDirection::Clockwise => "cw",
            RotateDirection::CounterClockwise => "ccw",
        }
    }
}

impl FromStr for RotateDirection {
    type Err = TelloError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cw" | "clockwise" => Ok(RotateDirection::Clockwise),
            "ccw" | "counterclockwise" => Ok(RotateDirection::CounterClockwise),
            _ => Err(TelloError::InvalidDirection(s.to_string())),
        }
    }
}

/// Flip direction
///
/// Callers may hold either the variant or its one-letter code; both
/// normalize here, so the wire only ever sees `l`, `r`, `f` or `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipDirection {
    Left,
    Right,
    Forward,
    Back,
}

impl FlipDirection {
    /// One-letter wire code
    pub fn code(self) -> char {
        match self {
            FlipDirection::Left => 'l',
            FlipDirection::Right => 'r',
            FlipDirection::Forward => 'f',
            FlipDirection::Back => 'b',
        }
    }
}

impl TryFrom<char> for FlipDirection {
    type Error = TelloError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'l' => Ok(FlipDirection::Left),
            'r' => Ok(FlipDirection::Right),
            'f' => Ok(FlipDirection::Forward),
            'b' => Ok(FlipDirection::Back),
            other => Err(TelloError::InvalidDirection(other.to_string())),
        }
    }
}

impl FromStr for FlipDirection {
    type Err = TelloError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "l" | "left" => Ok(FlipDirection::Left),
            "r" | "right" => Ok(FlipDirection::Right),
            "f" | "forward" => Ok(FlipDirection::Forward),
            "b" | "back" => Ok(FlipDirection::Back),
            _ => Err(TelloError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<&str> for FlipDirection {
    type Error = TelloError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Parameterless verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlVerb {
    /// Enter command mode
    Command,
    Takeoff,
    Land,
    Emergency,
    Stop,
    StreamOn,
    StreamOff,
}

impl ControlVerb {
    pub const ALL: [ControlVerb; 7] = [
        ControlVerb::Command,
        ControlVerb::Takeoff,
        ControlVerb::Land,
        ControlVerb::Emergency,
        ControlVerb::Stop,
        ControlVerb::StreamOn,
        ControlVerb::StreamOff,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ControlVerb::Command => "command",
            ControlVerb::Takeoff => "takeoff",
            ControlVerb::Land => "land",
            ControlVerb::Emergency => "emergency",
            ControlVerb::Stop => "stop",
            ControlVerb::StreamOn => "streamon",
            ControlVerb::StreamOff => "streamoff",
        }
    }
}

/// A command for the vehicle
///
/// Construction does not validate; `encode_command` is the only way to
/// turn a command into a wire string and checks every parameter first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Parameterless command
    Control(ControlVerb),

    /// Fly a distance in one direction
    Move { direction: MoveDirection, cm: Number },

    /// Rotate in place
    Rotate { direction: RotateDirection, degrees: Number },

    /// Set flight speed
    Speed { speed: Number },

    /// Flip in a direction
    Flip { direction: FlipDirection },
}

impl Command {
    /// Wire verb
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Control(verb) => verb.token(),
            Command::Move { direction, .. } => direction.token(),
            Command::Rotate { direction, .. } => direction.token(),
            Command::Speed { .. } => "speed",
            Command::Flip { .. } => "flip",
        }
    }

    /// Ordered parameter tokens
    pub fn params(&self) -> Vec<String> {
        match self {
            Command::Control(_) => Vec::new(),
            Command::Move { cm, .. } => vec![cm.to_string()],
            Command::Rotate { degrees, .. } => vec![degrees.to_string()],
            Command::Speed { speed } => vec![speed.to_string()],
            Command::Flip { direction } => vec![direction.code().to_string()],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())?;
        for param in self.params() {
            write!(f, " {}", param)?;
        }
        Ok(())
    }
}
