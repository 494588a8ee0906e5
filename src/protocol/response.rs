//! Response definitions
//!
//! The peer's reply to one command.

use std::fmt;

/// Acknowledgment text returned by the peer, passed through verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    /// Reply text exactly as received (lossy UTF-8)
    text: String,

    /// Size of the command datagram that produced this reply
    bytes_sent: usize,
}

impl Acknowledgment {
    /// Build from a received datagram
    pub fn from_datagram(datagram: &[u8], bytes_sent: usize) -> Self {
        Self {
            text: String::from_utf8_lossy(datagram).into_owned(),
            bytes_sent,
        }
    }

    /// Reply text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Bytes the command datagram occupied on the wire
    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Acknowledgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<str> for Acknowledgment {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Acknowledgment {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
