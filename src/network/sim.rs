//! Simulated peer
//!
//! A UDP endpoint that behaves like the vehicle's command port: every
//! datagram gets exactly one text reply. Lines that decode to a known
//! command get the configured acknowledgment, anything else gets the
//! error reply. Used by the `tello-sim` binary and the end-to-end tests.

use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use crate::error::Result;
use crate::protocol::decode_command;

/// How often the receive loop checks for shutdown
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Reply behavior, adjustable while the peer runs
#[derive(Debug, Clone)]
pub struct SimBehavior {
    /// Reply to lines that decode
    pub ack: String,

    /// Reply to lines that do not decode
    pub error_reply: String,

    /// Delay before each reply
    pub reply_delay: Duration,

    /// Swallow commands without replying
    pub silent: bool,
}

impl Default for SimBehavior {
    fn default() -> Self {
        Self {
            ack: "ok".to_string(),
            error_reply: "error".to_string(),
            reply_delay: Duration::ZERO,
            silent: false,
        }
    }
}

/// Mock command peer
pub struct SimPeer {
    socket: UdpSocket,
    behavior: Arc<Mutex<SimBehavior>>,
    shutdown: Arc<AtomicBool>,
    received_tx: Sender<String>,
    received_rx: Receiver<String>,
}

impl SimPeer {
    /// Bind the peer to `addr` (use port 0 for an ephemeral port)
    pub fn bind(addr: &str, behavior: SimBehavior) -> Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(POLL_INTERVAL))?;
        let (received_tx, received_rx) = channel::unbounded();

        Ok(Self {
            socket,
            behavior: Arc::new(Mutex::new(behavior)),
            shutdown: Arc::new(AtomicBool::new(false)),
            received_tx,
            received_rx,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Handle controlling this peer from another thread
    pub fn handle(&self) -> SimHandle {
        SimHandle {
            behavior: Arc::clone(&self.behavior),
            shutdown: Arc::clone(&self.shutdown),
            received: self.received_rx.clone(),
            thread: None,
        }
    }

    /// Run on a background thread
    pub fn spawn(self) -> Result<SimHandle> {
        let mut handle = self.handle();
        let thread = thread::Builder::new()
            .name("tello-sim".to_string())
            .spawn(move || {
                if let Err(e) = self.run() {
                    tracing::error!("Simulated peer stopped: {}", e);
                }
            })?;
        handle.thread = Some(thread);
        Ok(handle)
    }

    /// Serve until shutdown is requested (blocking)
    pub fn run(&self) -> Result<()> {
        tracing::info!("Simulated peer listening on {}", self.local_addr()?);

        let mut buf = [0u8; 2048];
        while !self.shutdown.load(Ordering::Relaxed) {
            let (len, from) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(ref e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                    continue
                }
                // A previous reply bounced off a closed client port
                Err(ref e) if e.kind() == ErrorKind::ConnectionReset => continue,
                Err(e) => return Err(e.into()),
            };

            let line = String::from_utf8_lossy(&buf[..len]).into_owned();
            self.serve_one(&line, from)?;
        }

        tracing::info!("Simulated peer shut down");
        Ok(())
    }

    fn serve_one(&self, line: &str, from: SocketAddr) -> Result<()> {
        tracing::debug!("Received {:?} from {}", line, from);
        let _ = self.received_tx.send(line.to_string());

        // Snapshot so a behavior change during the delay applies to the next command
        let behavior = self.behavior.lock().clone();
        if behavior.silent {
            return Ok(());
        }

        let reply = match decode_command(line) {
            Ok(_) => behavior.ack,
            Err(e) => {
                tracing::debug!("Rejecting {:?}: {}", line, e);
                behavior.error_reply
            }
        };

        if !behavior.reply_delay.is_zero() {
            thread::sleep(behavior.reply_delay);
        }

        match self.socket.send_to(reply.as_bytes(), from) {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!("Error replying to {}: {}", from, e);
                Ok(())
            }
        }
    }
}

/// Controls a running `SimPeer`
pub struct SimHandle {
    behavior: Arc<Mutex<SimBehavior>>,
    shutdown: Arc<AtomicBool>,
    received: Receiver<String>,
    thread: Option<JoinHandle<()>>,
}

impl SimHandle {
    /// Replace the reply behavior for subsequent commands
    pub fn set_behavior(&self, behavior: SimBehavior) {
        *self.behavior.lock() = behavior;
    }

    pub fn set_ack(&self, ack: impl Into<String>) {
        self.behavior.lock().ack = ack.into();
    }

    /// Next received line, waiting up to `timeout`
    pub fn next_received(&self, timeout: Duration) -> Option<String> {
        self.received.recv_timeout(timeout).ok()
    }

    /// All lines received so far and not yet taken
    pub fn drain_received(&self) -> Vec<String> {
        self.received.try_iter().collect()
    }

    /// Signal the peer to stop and wait for its thread
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SimHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop();
        }
    }
}
