use crate::dns_protocol::TransportProtocol;
use crate::telemetry::ReasonCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Failed to encode {transport} query for {domain}: {reason}")]
    EncodeFailed {
        transport: TransportProtocol,
        domain: String,
        reason: String,
    },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Transport timeout waiting on {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Transport I/O error with {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Got too many bytes from TCP: {received} received, frame is {expected}")]
    FramingOverrun { expected: usize, received: usize },

    #[error("Connection to {server} closed after {received} of {expected} bytes")]
    ConnectionClosed {
        server: String,
        received: usize,
        expected: usize,
    },

    #[error("Reading nameservers is not supported on {0}")]
    UnsupportedPlatform(String),

    #[error("No nameservers found")]
    NameserversNotFound,

    #[error("Failed to read nameservers: {0}")]
    NameserverRead(String),

    #[error("Invalid nameserver: {0}")]
    InvalidNameserver(String),
}

impl DomainError {
    pub fn is_encode_error(&self) -> bool {
        matches!(self, DomainError::EncodeFailed { .. })
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::TransportIo { .. }
                | DomainError::FramingOverrun { .. }
                | DomainError::ConnectionClosed { .. }
        )
    }

    pub fn is_discovery_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnsupportedPlatform(_)
                | DomainError::NameserversNotFound
                | DomainError::NameserverRead(_)
        )
    }

    /// Reason code reported when this error ends an attempt over `transport`.
    ///
    /// Only encode failures carry their own label; every other attempt failure
    /// is reported as the transport's misc error.
    pub fn attempt_reason(&self, transport: TransportProtocol) -> ReasonCode {
        match self {
            DomainError::EncodeFailed { transport, .. } => ReasonCode::encode_error(*transport),
            _ => ReasonCode::misc_error(transport),
        }
    }

    /// Reason code reported when nameserver discovery fails.
    pub fn discovery_reason(&self) -> ReasonCode {
        match self {
            DomainError::UnsupportedPlatform(_) => ReasonCode::NameserversOsNotSupported,
            DomainError::NameserversNotFound => ReasonCode::NameserversNotFound,
            _ => ReasonCode::NameserversMisc,
        }
    }
}
