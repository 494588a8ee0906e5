//! Error types for tello-command
//!
//! Provides a unified error type for all operations.

use std::io::ErrorKind;

use thiserror::Error;

/// Result type alias using TelloError
pub type Result<T> = std::result::Result<T, TelloError>;

/// Unified error type for tello-command operations
#[derive(Debug, Error)]
pub enum TelloError {
    // -------------------------------------------------------------------------
    // Validation Errors (raised before anything is transmitted)
    // -------------------------------------------------------------------------
    #[error("{param} must be between {min} and {max} inclusive, got {value}")]
    OutOfRange {
        param: &'static str,
        value: String,
        min: i64,
        max: i64,
    },

    #[error("{param} must be a number, got {input:?}")]
    NotANumber { param: &'static str, input: String },

    #[error("Invalid direction {0:?}")]
    InvalidDirection(String),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Not connected: connect() and initialize_command_mode() must complete first")]
    NotConnected,

    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::convert::Infallible> for TelloError {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}

impl TelloError {
    /// True when the transport gave up waiting for a reply
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            TelloError::Transport(e)
                if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut
        )
    }

    /// True for correctable input mistakes (re-prompt or clamp),
    /// false for failures that need reconnection or an operator.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TelloError::OutOfRange { .. }
                | TelloError::NotANumber { .. }
                | TelloError::InvalidDirection(_)
                | TelloError::Protocol(_)
        )
    }
}
