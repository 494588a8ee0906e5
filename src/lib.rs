//! # tello-command
//!
//! A client for the Tello text command protocol:
//! - Parameter validation against the protocol's legal ranges
//! - Rendering of exact wire-format command lines
//! - Connection lifecycle (connect, command mode, disconnect)
//! - Blocking send/acknowledge exchange over UDP
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Caller / Control Surface                     │
//! │                 (tello-cli, applications)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ fly_up(100), flip('l'), ...
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    TelloClient                               │
//! │        (lifecycle, one exchange at a time)                   │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │  Protocol Codec │                │    Transport    │
//!   │ (validate+render)│               │  (UDP socket)   │
//!   └─────────────────┘                └────────┬────────┘
//!                                               │ "up 100" / "ok"
//!                                               ▼
//!                                      ┌─────────────────┐
//!                                      │  Vehicle / Sim  │
//!                                      └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TelloError, Result};
pub use config::Config;
pub use network::TelloClient;
pub use protocol::{Acknowledgment, FlipDirection};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tello-command
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
