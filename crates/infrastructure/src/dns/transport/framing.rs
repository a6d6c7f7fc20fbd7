//! Receive-side assembly of one length-prefixed DNS message (RFC 1035 §4.2.2).

use dnssec_probe_domain::dns_message::TCP_LENGTH_PREFIX_LEN;
use dnssec_probe_domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    NeedMore,
    Complete,
}

/// Accumulates chunks until the declared length plus prefix has arrived.
///
/// The buffer keeps the prefix: a completed frame is exactly what the wire
/// delivered.
#[derive(Debug, Default)]
pub struct TcpFrameBuffer {
    bytes: Vec<u8>,
    expected: Option<usize>,
}

impl TcpFrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one received chunk.
    ///
    /// Fails with `FramingOverrun` as soon as more bytes than `L + 2` have been
    /// received. Pushing after completion is an overrun as well.
    pub fn push(&mut self, chunk: &[u8]) -> Result<FrameStatus, DomainError> {
        self.bytes.extend_from_slice(chunk);

        if self.expected.is_none() && self.bytes.len() >= TCP_LENGTH_PREFIX_LEN {
            let declared = u16::from_be_bytes([self.bytes[0], self.bytes[1]]) as usize;
            self.expected = Some(declared + TCP_LENGTH_PREFIX_LEN);
        }

        match self.expected {
            Some(expected) if self.bytes.len() > expected => Err(DomainError::FramingOverrun {
                expected,
                received: self.bytes.len(),
            }),
            Some(expected) if self.bytes.len() == expected => Ok(FrameStatus::Complete),
            _ => Ok(FrameStatus::NeedMore),
        }
    }

    /// Total frame size once the prefix has been read.
    pub fn expected_len(&self) -> Option<usize> {
        self.expected
    }

    pub fn received(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_complete(&self) -> bool {
        self.expected == Some(self.bytes.len())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
