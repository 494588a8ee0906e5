//! Command Client
//!
//! Owns the connection to the vehicle and performs one blocking
//! command/acknowledgment exchange per operation.
//!
//! ## Lifecycle
//! ```text
//! Disconnected ──connect()──▶ Connected ──initialize_command_mode()──▶ Command Mode
//!      ▲                                                                    │
//!      └──────────────────────────────disconnect()──────────────────────────┘
//! ```
//!
//! ## Usage model
//! Strictly sequential. Replies carry no request id, so a second command
//! must not be issued until the first has returned. The client holds no
//! lock; callers sharing it across threads serialize access themselves
//! (for example behind a `Mutex`).

use std::net::SocketAddr;

use crate::config::{self, Config};
use crate::error::{Result, TelloError};
use crate::protocol::{
    render_flip, render_move, render_rotate, render_set_speed, render_simple, Acknowledgment,
    ControlVerb, FlipDirection, MoveDirection, Number, RotateDirection,
};
use super::transport::{Connector, Transport, UdpConnector};

/// Client for the text command protocol
pub struct TelloClient<C: Connector = UdpConnector> {
    /// Client configuration (peer endpoint, timeouts)
    config: Config,

    /// Opens the link on connect
    connector: C,

    /// The live connection, if any
    link: Option<C::Link>,

    /// Peer the live connection points at
    peer: Option<SocketAddr>,

    /// Set once the `command` verb has been acknowledged
    command_mode: bool,
}

impl TelloClient<UdpConnector> {
    /// Create a UDP client for the configured peer (not yet connected)
    pub fn new(config: Config) -> Self {
        Self::with_connector(config, UdpConnector)
    }
}

impl Default for TelloClient<UdpConnector> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<C: Connector> TelloClient<C> {
    /// Create a client that opens its link through `connector`
    pub fn with_connector(config: Config, connector: C) -> Self {
        Self {
            config,
            connector,
            link: None,
            peer: None,
            command_mode: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the connection to the configured peer
    ///
    /// A no-op if already connected.
    pub fn connect(&mut self) -> Result<()> {
        let peer = self.config.peer_addr()?;
        self.connect_addr(peer)
    }

    /// Open the connection to another endpoint than the configured one
    pub fn connect_to(&mut self, host: &str, port: u16) -> Result<()> {
        let peer = config::resolve(host, port)?;
        self.connect_addr(peer)
    }

    fn connect_addr(&mut self, peer: SocketAddr) -> Result<()> {
        if self.link.is_some() {
            tracing::debug!("Already connected to {:?}, ignoring connect", self.peer);
            return Ok(());
        }

        let link = self.connector.connect(peer, &self.config)?;
        self.link = Some(link);
        self.peer = Some(peer);
        self.command_mode = false;

        tracing::debug!("Connected to {}", peer);
        Ok(())
    }

    /// Send the `command` verb, after which motion commands are honored
    pub fn initialize_command_mode(&mut self) -> Result<Acknowledgment> {
        let ack = self.exchange(&render_simple(ControlVerb::Command))?;
        self.command_mode = true;
        tracing::debug!("Command mode entered: {}", ack);
        Ok(ack)
    }

    /// `connect` followed by `initialize_command_mode`
    pub fn connect_and_initialize(&mut self) -> Result<Acknowledgment> {
        self.connect()?;
        self.initialize_command_mode()
    }

    /// Shut down and release the connection
    ///
    /// Calling this while disconnected is a no-op returning `Ok(())`.
    pub fn disconnect(&mut self) -> Result<()> {
        let Some(mut link) = self.link.take() else {
            tracing::debug!("disconnect() called while not connected");
            return Ok(());
        };

        self.command_mode = false;
        let peer = self.peer.take();
        link.shutdown()?;

        tracing::debug!("Disconnected from {:?}", peer);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn is_command_mode(&self) -> bool {
        self.command_mode
    }

    /// Peer of the live connection
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Motion
    // =========================================================================

    pub fn fly_up(&mut self, cm: impl Into<Number>) -> Result<Acknowledgment> {
        self.fly(MoveDirection::Up, cm.into())
    }

    pub fn fly_down(&mut self, cm: impl Into<Number>) -> Result<Acknowledgment> {
        self.fly(MoveDirection::Down, cm.into())
    }

    pub fn fly_left(&mut self, cm: impl Into<Number>) -> Result<Acknowledgment> {
        self.fly(MoveDirection::Left, cm.into())
    }

    pub fn fly_right(&mut self, cm: impl Into<Number>) -> Result<Acknowledgment> {
        self.fly(MoveDirection::Right, cm.into())
    }

    pub fn fly_forward(&mut self, cm: impl Into<Number>) -> Result<Acknowledgment> {
        self.fly(MoveDirection::Forward, cm.into())
    }

    pub fn fly_backward(&mut self, cm: impl Into<Number>) -> Result<Acknowledgment> {
        self.fly(MoveDirection::Back, cm.into())
    }

    /// Fly `cm` centimeters (20..=500) in `direction`
    pub fn fly(&mut self, direction: MoveDirection, cm: Number) -> Result<Acknowledgment> {
        let line = render_move(direction, cm)?;
        self.flight_exchange(&line)
    }

    pub fn rotate_clockwise(&mut self, degrees: impl Into<Number>) -> Result<Acknowledgment> {
        self.rotate(RotateDirection::Clockwise, degrees.into())
    }

    pub fn rotate_counterclockwise(&mut self, degrees: impl Into<Number>) -> Result<Acknowledgment> {
        self.rotate(RotateDirection::CounterClockwise, degrees.into())
    }

    /// Rotate `degrees` (1..=360) in `direction`
    pub fn rotate(&mut self, direction: RotateDirection, degrees: Number) -> Result<Acknowledgment> {
        let line = render_rotate(direction, degrees)?;
        self.flight_exchange(&line)
    }

    /// Set speed in cm/s (10..=100)
    pub fn set_speed(&mut self, speed: impl Into<Number>) -> Result<Acknowledgment> {
        let line = render_set_speed(speed)?;
        self.flight_exchange(&line)
    }

    /// Flip; accepts a `FlipDirection`, a `char` code or a `&str`
    pub fn flip<D>(&mut self, direction: D) -> Result<Acknowledgment>
    where
        D: TryInto<FlipDirection>,
        TelloError: From<<D as TryInto<FlipDirection>>::Error>,
    {
        let line = render_flip(direction)?;
        self.flight_exchange(&line)
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn takeoff(&mut self) -> Result<Acknowledgment> {
        self.control(ControlVerb::Takeoff)
    }

    pub fn land(&mut self) -> Result<Acknowledgment> {
        self.control(ControlVerb::Land)
    }

    /// Stop all motors immediately
    pub fn emergency(&mut self) -> Result<Acknowledgment> {
        self.control(ControlVerb::Emergency)
    }

    /// Hover in place
    pub fn stop(&mut self) -> Result<Acknowledgment> {
        self.control(ControlVerb::Stop)
    }

    pub fn stream_on(&mut self) -> Result<Acknowledgment> {
        self.control(ControlVerb::StreamOn)
    }

    pub fn stream_off(&mut self) -> Result<Acknowledgment> {
        self.control(ControlVerb::StreamOff)
    }

    fn control(&mut self, verb: ControlVerb) -> Result<Acknowledgment> {
        self.flight_exchange(&render_simple(verb))
    }

    /// Transmit `raw` verbatim
    ///
    /// Bypasses all validation: whatever text is passed goes on the wire.
    /// Only requires a connection, not command mode.
    pub fn send_command(&mut self, raw: &str) -> Result<Acknowledgment> {
        self.exchange(raw)
    }

    // =========================================================================
    // Exchange
    // =========================================================================

    /// Exchange that additionally requires command mode
    fn flight_exchange(&mut self, line: &str) -> Result<Acknowledgment> {
        if !self.command_mode {
            return Err(TelloError::NotConnected);
        }
        self.exchange(line)
    }

    /// Send one datagram and block for exactly one reply
    fn exchange(&mut self, line: &str) -> Result<Acknowledgment> {
        let link = self.link.as_mut().ok_or(TelloError::NotConnected)?;

        // A reply that arrived after an earlier timeout would otherwise be
        // taken as the answer to this command.
        for stale in link.drain_pending()? {
            tracing::warn!(
                "Discarding late reply {:?} before sending {:?}",
                String::from_utf8_lossy(&stale),
                line
            );
        }

        // Send the command line as one datagram
        tracing::trace!("-> {}", line);
        let sent = link.send(line.as_bytes()).map_err(|e| {
            tracing::warn!("Send of {:?} failed: {}", line, e);
            TelloError::Transport(e)
        })?;

        // Block for exactly one reply datagram
        let mut buf = vec![0u8; self.config.recv_buffer_size.max(1)];
        let received = link.recv(&mut buf).map_err(|e| {
            tracing::warn!("No reply to {:?}: {}", line, e);
            TelloError::Transport(e)
        })?;

        // A reply filling the whole buffer was probably cut short
        if received == buf.len() {
            tracing::warn!(
                "Reply to {:?} filled the {}-byte receive buffer and may be truncated",
                line,
                buf.len()
            );
        }

        let ack = Acknowledgment::from_datagram(&buf[..received], sent);
        tracing::trace!("<- {}", ack);
        Ok(ack)
    }
}

impl<C: Connector> Drop for TelloClient<C> {
    fn drop(&mut self) {
        if let Some(mut link) = self.link.take() {
            if let Err(e) = link.shutdown() {
                tracing::warn!("Error shutting down connection on drop: {}", e);
            }
        }
    }
}
