//! Codec Tests
//!
//! Tests for command validation, rendering and decoding.

use tello_command::protocol::{
    decode_command, encode_command, render_flip, render_move, render_rotate, render_set_speed,
    render_simple, Command, ControlVerb, FlipDirection, MoveDirection, Number, RotateDirection,
};
use tello_command::TelloError;

// =============================================================================
// Move Tests
// =============================================================================

#[test]
fn test_render_move_every_legal_distance() {
    for cm in 20..=500 {
        let line = render_move(MoveDirection::Up, cm).unwrap();
        let suffix: i64 = line.strip_prefix("up ").unwrap().parse().unwrap();
        assert_eq!(suffix, cm as i64);
    }
}

#[test]
fn test_render_move_direction_tokens() {
    let cases = [
        (MoveDirection::Up, "up 120"),
        (MoveDirection::Down, "down 120"),
        (MoveDirection::Left, "left 120"),
        (MoveDirection::Right, "right 120"),
        (MoveDirection::Forward, "forward 120"),
        (MoveDirection::Back, "back 120"),
    ];
    for (direction, expected) in cases {
        assert_eq!(render_move(direction, 120).unwrap(), expected);
    }
}

#[test]
fn test_render_move_boundaries_are_legal() {
    assert_eq!(render_move(MoveDirection::Left, 20).unwrap(), "left 20");
    assert_eq!(render_move(MoveDirection::Left, 500).unwrap(), "left 500");
}

#[test]
fn test_render_move_just_outside_bounds() {
    for cm in [19.999, 500.001] {
        match render_move(MoveDirection::Forward, cm) {
            Err(TelloError::OutOfRange { min, max, .. }) => {
                assert_eq!((min, max), (20, 500));
            }
            other => panic!("Expected OutOfRange for {}, got {:?}", cm, other),
        }
    }
    assert!(matches!(
        render_move(MoveDirection::Forward, 19),
        Err(TelloError::OutOfRange { .. })
    ));
    assert!(matches!(
        render_move(MoveDirection::Forward, 501),
        Err(TelloError::OutOfRange { .. })
    ));
}

#[test]
fn test_render_move_keeps_numeric_form() {
    // Integers never grow a fractional part
    assert_eq!(render_move(MoveDirection::Up, 100).unwrap(), "up 100");
    assert_eq!(render_move(MoveDirection::Up, 100u16).unwrap(), "up 100");
    // Whole floats render without ".0"
    assert_eq!(render_move(MoveDirection::Up, 100.0).unwrap(), "up 100");
    // Fractional floats keep their fraction
    assert_eq!(render_move(MoveDirection::Up, 100.5).unwrap(), "up 100.5");
}

#[test]
fn test_render_f32_keeps_written_decimal() {
    assert_eq!(render_move(MoveDirection::Up, 20.1f32).unwrap(), "up 20.1");
    assert_eq!(render_rotate(RotateDirection::Clockwise, 90.3f32).unwrap(), "cw 90.3");
    assert_eq!(render_set_speed(33.3f32).unwrap(), "speed 33.3");
    assert!(matches!(
        render_move(MoveDirection::Up, f32::NAN),
        Err(TelloError::NotANumber { .. })
    ));
}

#[test]
fn test_render_move_nan_is_not_a_number() {
    assert!(matches!(
        render_move(MoveDirection::Up, f64::NAN),
        Err(TelloError::NotANumber { .. })
    ));
    assert!(matches!(
        render_move(MoveDirection::Up, f64::INFINITY),
        Err(TelloError::NotANumber { .. })
    ));
}

// =============================================================================
// Rotate Tests
// =============================================================================

#[test]
fn test_render_rotate_every_legal_angle() {
    for degrees in 1..=360 {
        assert_eq!(
            render_rotate(RotateDirection::Clockwise, degrees).unwrap(),
            format!("cw {}", degrees)
        );
        assert_eq!(
            render_rotate(RotateDirection::CounterClockwise, degrees).unwrap(),
            format!("ccw {}", degrees)
        );
    }
}

#[test]
fn test_render_rotate_out_of_range() {
    for degrees in [0, 361, -90] {
        match render_rotate(RotateDirection::Clockwise, degrees) {
            Err(TelloError::OutOfRange { min, max, .. }) => assert_eq!((min, max), (1, 360)),
            other => panic!("Expected OutOfRange for {}, got {:?}", degrees, other),
        }
    }
}

// =============================================================================
// Speed Tests
// =============================================================================

#[test]
fn test_render_set_speed() {
    assert_eq!(render_set_speed(10).unwrap(), "speed 10");
    assert_eq!(render_set_speed(50).unwrap(), "speed 50");
    assert_eq!(render_set_speed(100).unwrap(), "speed 100");
}

#[test]
fn test_render_set_speed_out_of_range() {
    assert!(matches!(render_set_speed(9), Err(TelloError::OutOfRange { .. })));
    assert!(matches!(render_set_speed(101), Err(TelloError::OutOfRange { .. })));
}

#[test]
fn test_out_of_range_message_names_parameter() {
    let err = render_set_speed(150).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("speed"));
    assert!(message.contains("150"));
    assert!(message.contains("10"));
    assert!(message.contains("100"));
}

// =============================================================================
// Flip Tests
// =============================================================================

#[test]
fn test_render_flip_code_and_variant_agree() {
    assert_eq!(render_flip('l').unwrap(), "flip l");
    assert_eq!(render_flip(FlipDirection::Left).unwrap(), "flip l");

    let pairs = [
        ('l', FlipDirection::Left),
        ('r', FlipDirection::Right),
        ('f', FlipDirection::Forward),
        ('b', FlipDirection::Back),
    ];
    for (code, variant) in pairs {
        assert_eq!(render_flip(code).unwrap(), render_flip(variant).unwrap());
    }
}

#[test]
fn test_render_flip_accepts_names() {
    assert_eq!(render_flip("left").unwrap(), "flip l");
    assert_eq!(render_flip("back").unwrap(), "flip b");
    assert_eq!(render_flip("f").unwrap(), "flip f");
}

#[test]
fn test_render_flip_invalid_direction() {
    assert!(matches!(render_flip('x'), Err(TelloError::InvalidDirection(_))));
    assert!(matches!(render_flip("up"), Err(TelloError::InvalidDirection(_))));
    assert!(matches!(render_flip(""), Err(TelloError::InvalidDirection(_))));
}

// =============================================================================
// Parameterless Tests
// =============================================================================

#[test]
fn test_render_simple_verbs() {
    let cases = [
        (ControlVerb::Command, "command"),
        (ControlVerb::Takeoff, "takeoff"),
        (ControlVerb::Land, "land"),
        (ControlVerb::Emergency, "emergency"),
        (ControlVerb::Stop, "stop"),
        (ControlVerb::StreamOn, "streamon"),
        (ControlVerb::StreamOff, "streamoff"),
    ];
    for (verb, expected) in cases {
        assert_eq!(render_simple(verb), expected);
    }
}

#[test]
fn test_encode_command_rejects_unchecked_construction() {
    let cmd = Command::Move {
        direction: MoveDirection::Down,
        cm: Number::Int(5),
    };
    assert!(matches!(encode_command(&cmd), Err(TelloError::OutOfRange { .. })));
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_rendered_lines() {
    let lines = ["command", "takeoff", "up 120", "ccw 90", "speed 50", "flip r", "streamoff"];
    for line in lines {
        let cmd = decode_command(line).unwrap();
        assert_eq!(encode_command(&cmd).unwrap(), line);
    }
}

#[test]
fn test_decode_typed_fields() {
    match decode_command("back 42").unwrap() {
        Command::Move { direction, cm } => {
            assert_eq!(direction, MoveDirection::Back);
            assert_eq!(cm, Number::Int(42));
        }
        other => panic!("Expected Move command, got {:?}", other),
    }
}

#[test]
fn test_decode_distinguishes_failure_kinds() {
    assert!(matches!(decode_command("up abc"), Err(TelloError::NotANumber { .. })));
    assert!(matches!(decode_command("up 10"), Err(TelloError::OutOfRange { .. })));
    assert!(matches!(decode_command("flip x"), Err(TelloError::InvalidDirection(_))));
    assert!(matches!(decode_command("flip left"), Err(TelloError::InvalidDirection(_))));
    assert!(matches!(decode_command("hover"), Err(TelloError::Protocol(_))));
    assert!(matches!(decode_command(""), Err(TelloError::Protocol(_))));
}

#[test]
fn test_decode_wrong_parameter_count() {
    let err = decode_command("takeoff now").unwrap_err();
    assert!(err.to_string().contains("takes 0 parameter"));

    assert!(matches!(decode_command("up"), Err(TelloError::Protocol(_))));
    assert!(matches!(decode_command("cw 1 2"), Err(TelloError::Protocol(_))));
}
