//! Protocol codec
//!
//! Validation plus rendering for the text wire protocol.
//!
//! ## Wire Format
//!
//! One command per datagram, ASCII, no trailing newline:
//! ```text
//! <verb>[ <param>]*
//! ```
//!
//! | Verb                               | Parameter         |
//! |------------------------------------|-------------------|
//! | command takeoff land emergency stop streamon streamoff | none |
//! | up down left right forward back    | cm in [20, 500]   |
//! | cw ccw                             | degrees in [1, 360] |
//! | speed                              | cm/s in [10, 100] |
//! | flip                               | l, r, f or b      |

use crate::error::{Result, TelloError};
use super::command::{
    parse_number, Command, ControlVerb, FlipDirection, MoveDirection, Number, RotateDirection,
    ANGLE_RANGE, DISTANCE_RANGE, SPEED_RANGE,
};

// =============================================================================
// Encoding
// =============================================================================

/// Validate a command and render its wire string
///
/// This is the single path from a `Command` to text. If any parameter is
/// illegal nothing is rendered, so no invalid line can reach a socket.
pub fn encode_command(command: &Command) -> Result<String> {
    validate(command)?;
    Ok(command.to_string())
}

fn validate(command: &Command) -> Result<()> {
    match *command {
        Command::Control(_) | Command::Flip { .. } => Ok(()),
        Command::Move { cm, .. } => DISTANCE_RANGE.check(cm).map(|_| ()),
        Command::Rotate { degrees, .. } => ANGLE_RANGE.check(degrees).map(|_| ()),
        Command::Speed { speed } => SPEED_RANGE.check(speed).map(|_| ()),
    }
}

/// Render `<direction> <cm>`, cm in [20, 500]
pub fn render_move(direction: MoveDirection, cm: impl Into<Number>) -> Result<String> {
    encode_command(&Command::Move {
        direction,
        cm: cm.into(),
    })
}

/// Render `cw <degrees>` or `ccw <degrees>`, degrees in [1, 360]
pub fn render_rotate(direction: RotateDirection, degrees: impl Into<Number>) -> Result<String> {
    encode_command(&Command::Rotate {
        direction,
        degrees: degrees.into(),
    })
}

/// Render `speed <speed>`, speed in [10, 100]
pub fn render_set_speed(speed: impl Into<Number>) -> Result<String> {
    encode_command(&Command::Speed {
        speed: speed.into(),
    })
}

/// Render `flip <code>`
///
/// Accepts a `FlipDirection`, a `char` code or a `&str` (code or name).
pub fn render_flip<D>(direction: D) -> Result<String>
where
    D: TryInto<FlipDirection>,
    TelloError: From<<D as TryInto<FlipDirection>>::Error>,
{
    let direction = direction.try_into()?;
    encode_command(&Command::Flip { direction })
}

/// Render a parameterless verb
pub fn render_simple(verb: ControlVerb) -> String {
    Command::Control(verb).to_string()
}

// =============================================================================
// Decoding
// =============================================================================

/// Parse a wire line into a validated command
///
/// Tokens are split on whitespace. Unknown verbs and wrong parameter
/// counts are `Protocol` errors; bad parameters keep their own kinds.
pub fn decode_command(line: &str) -> Result<Command> {
    let mut tokens = line.split_whitespace();
    let verb = tokens
        .next()
        .ok_or_else(|| TelloError::Protocol("empty command line".to_string()))?;
    let params: Vec<&str> = tokens.collect();

    let command = if let Some(control) = ControlVerb::ALL.into_iter().find(|v| v.token() == verb) {
        expect_params(verb, &params, 0)?;
        Command::Control(control)
    } else if let Ok(direction) = verb.parse::<MoveDirection>() {
        expect_params(verb, &params, 1)?;
        Command::Move {
            direction,
            cm: parse_number(DISTANCE_RANGE.param, params[0])?,
        }
    } else if verb == "cw" || verb == "ccw" {
        expect_params(verb, &params, 1)?;
        Command::Rotate {
            direction: verb.parse()?,
            degrees: parse_number(ANGLE_RANGE.param, params[0])?,
        }
    } else if verb == "speed" {
        expect_params(verb, &params, 1)?;
        Command::Speed {
            speed: parse_number(SPEED_RANGE.param, params[0])?,
        }
    } else if verb == "flip" {
        expect_params(verb, &params, 1)?;
        Command::Flip {
            direction: decode_flip_code(params[0])?,
        }
    } else {
        return Err(TelloError::Protocol(format!("unknown verb {:?}", verb)));
    };

    validate(&command)?;
    Ok(command)
}

fn expect_params(verb: &str, params: &[&str], expected: usize) -> Result<()> {
    if params.len() != expected {
        return Err(TelloError::Protocol(format!(
            "{} takes {} parameter(s), got {}",
            verb,
            expected,
            params.len()
        )));
    }
    Ok(())
}

/// The wire carries only the one-letter code
fn decode_flip_code(token: &str) -> Result<FlipDirection> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => FlipDirection::try_from(c),
        _ => Err(TelloError::InvalidDirection(token.to_string())),
    }
}
