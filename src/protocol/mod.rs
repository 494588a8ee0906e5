//! Protocol Module
//!
//! Defines the text command protocol spoken to the vehicle.
//!
//! ## Protocol Format
//!
//! ### Request
//! One UDP datagram carrying one ASCII line, tokens separated by spaces:
//! ```text
//! ┌────────┬───┬──────────┬───┬──────────┐
//! │  verb  │ ␠ │ param 1  │ ␠ │   ...    │
//! └────────┴───┴──────────┴───┴──────────┘
//! ```
//!
//! ### Response
//! One UDP datagram of text (usually `ok` or `error`). The client returns
//! it untouched.
//!
//! ### Pairing
//! There are no request ids: the reply to a command is simply the next
//! datagram that arrives. Only one command may be in flight.

mod command;
mod response;
mod codec;

pub use command::{
    parse_number, Command, ControlVerb, FlipDirection, MoveDirection, Number, Range,
    RotateDirection, ANGLE_RANGE, DEFAULT_ANGLE_DEGREES, DEFAULT_DISTANCE_CM, DISTANCE_RANGE,
    SPEED_RANGE,
};
pub use response::Acknowledgment;
pub use codec::{
    decode_command, encode_command, render_flip, render_move, render_rotate, render_set_speed,
    render_simple,
};
