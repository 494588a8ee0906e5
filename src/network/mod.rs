//! Network Module
//!
//! UDP command client and a simulated peer.
//!
//! ## Architecture
//! - `TelloClient` owns exactly one connection and performs one blocking
//!   exchange per command
//! - `Transport`/`Connector` separate the client from the socket
//! - `SimPeer` answers like the vehicle's command port

mod transport;
mod client;
mod sim;

pub use transport::{Connector, Transport, UdpConnector, UdpTransport};
pub use client::TelloClient;
pub use sim::{SimBehavior, SimHandle, SimPeer};
