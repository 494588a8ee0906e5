//! Configuration for tello-command
//!
//! Centralized configuration with sensible defaults.

use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{Result, TelloError};

/// Default command address of the vehicle
pub const DEFAULT_HOST: &str = "192.168.10.1";

/// Default command port of the vehicle
pub const DEFAULT_PORT: u16 = 8889;

/// Main configuration for a command client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Peer Endpoint
    // -------------------------------------------------------------------------
    /// Peer host (IP address or resolvable name)
    pub host: String,

    /// Peer UDP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Local address the UDP socket binds to
    pub bind_addr: String,

    /// How long to wait for an acknowledgment (milliseconds, 0 = forever)
    pub response_timeout_ms: u64,

    /// Send timeout (milliseconds, 0 = forever)
    pub write_timeout_ms: u64,

    /// Receive buffer for one acknowledgment datagram
    pub recv_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            bind_addr: "0.0.0.0:0".to_string(),
            response_timeout_ms: 5000,
            write_timeout_ms: 5000,
            recv_buffer_size: 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve the peer endpoint to a socket address
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        resolve(&self.host, self.port)
    }
}

/// Resolve host/port, taking the first address the resolver offers
pub(crate) fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()
        .map_err(|e| TelloError::Config(format!("cannot resolve {}:{}: {}", host, port, e)))?
        .next()
        .ok_or_else(|| TelloError::Config(format!("no address found for {}:{}", host, port)))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the peer host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the peer port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set host and port from an already resolved address
    pub fn peer(mut self, addr: SocketAddr) -> Self {
        self.config.host = addr.ip().to_string();
        self.config.port = addr.port();
        self
    }

    /// Set the local bind address
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.bind_addr = addr.into();
        self
    }

    /// Set the acknowledgment timeout (in milliseconds)
    pub fn response_timeout_ms(mut self, ms: u64) -> Self {
        self.config.response_timeout_ms = ms;
        self
    }

    /// Set the send timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the receive buffer size (in bytes, at least 1)
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.config.recv_buffer_size = size;
        self
    }

    pub fn build(mut self) -> Config {
        // A zero-length buffer would turn every reply into ""
        self.config.recv_buffer_size = self.config.recv_buffer_size.max(1);
        self.config
    }
}
