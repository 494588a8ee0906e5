//! Datagram transport
//!
//! The client talks to the peer through these two traits so the socket
//! can be swapped for a stub in tests.

use std::io::{self, ErrorKind};
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use crate::config::Config;

/// A connected datagram link to one peer
pub trait Transport {
    /// Send one datagram, returning the number of bytes sent
    fn send(&mut self, datagram: &[u8]) -> io::Result<usize>;

    /// Block for one datagram (bounded by the configured timeout)
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Discard datagrams already waiting, returning them for logging
    fn drain_pending(&mut self) -> io::Result<Vec<Vec<u8>>> {
        Ok(Vec::new())
    }

    /// Stop further sends and receives
    fn shutdown(&mut self) -> io::Result<()>;
}

/// Opens a transport to a peer
pub trait Connector {
    type Link: Transport;

    fn connect(&mut self, peer: SocketAddr, config: &Config) -> io::Result<Self::Link>;
}

// =============================================================================
// UDP
// =============================================================================

/// UDP socket connected to the peer
pub struct UdpTransport {
    /// Taken on shutdown; later calls fail with `NotConnected`
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    /// Bind locally and connect to the peer, applying timeouts
    pub fn connect(peer: SocketAddr, config: &Config) -> io::Result<Self> {
        // Bind locally, then fix the peer so send/recv only talk to it
        let socket = UdpSocket::bind(config.bind_addr.as_str())?;
        socket.connect(peer)?;

        let transport = Self {
            socket: Some(socket),
        };
        transport.set_timeouts(config.response_timeout_ms, config.write_timeout_ms)?;
        Ok(transport)
    }

    /// Configure socket timeouts (0 = block forever)
    pub fn set_timeouts(&self, read_ms: u64, write_ms: u64) -> io::Result<()> {
        let socket = self.socket()?;
        let to_duration = |ms: u64| (ms > 0).then(|| Duration::from_millis(ms));
        socket.set_read_timeout(to_duration(read_ms))?;
        socket.set_write_timeout(to_duration(write_ms))?;
        Ok(())
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket()?.local_addr()
    }

    fn socket(&self) -> io::Result<&UdpSocket> {
        self.socket
            .as_ref()
            .ok_or_else(|| io::Error::new(ErrorKind::NotConnected, "transport is shut down"))
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, datagram: &[u8]) -> io::Result<usize> {
        self.socket()?.send(datagram)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.socket()?.recv(buf)
    }

    fn drain_pending(&mut self) -> io::Result<Vec<Vec<u8>>> {
        let socket = self.socket()?;

        // Poll without blocking so an empty queue returns immediately
        socket.set_nonblocking(true)?;

        let mut stale = Vec::new();
        let mut buf = [0u8; 2048];
        let result = loop {
            match socket.recv(&mut buf) {
                Ok(n) => stale.push(buf[..n].to_vec()),
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => break Ok(()),
                // ICMP port-unreachable from an earlier send surfaces here
                Err(ref e) if e.kind() == ErrorKind::ConnectionRefused => continue,
                Err(e) => break Err(e),
            }
        };

        // Back to blocking reads bounded by the read timeout
        socket.set_nonblocking(false)?;
        result.map(|_| stale)
    }

    /// UDP has no stream to half-close: refuse further I/O, then release
    /// the socket by dropping it.
    fn shutdown(&mut self) -> io::Result<()> {
        drop(self.socket.take());
        Ok(())
    }
}

/// Connector producing `UdpTransport`s
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpConnector;

impl Connector for UdpConnector {
    type Link = UdpTransport;

    fn connect(&mut self, peer: SocketAddr, config: &Config) -> io::Result<UdpTransport> {
        UdpTransport::connect(peer, config)
    }
}
