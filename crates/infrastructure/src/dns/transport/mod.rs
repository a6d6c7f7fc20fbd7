pub mod framing;
pub mod tcp;
pub mod udp;

use dnssec_probe_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

pub use framing::{FrameStatus, TcpFrameBuffer};
pub use tcp::TcpTransport;
pub use udp::UdpTransport;

/// Resolver default per-attempt wait.
pub const DEFAULT_TRANSPORT_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn map_io_error(server: SocketAddr, error: io::Error) -> DomainError {
    let server = server.to_string();
    match error.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused { server },
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            DomainError::TransportConnectionReset { server }
        }
        io::ErrorKind::TimedOut => DomainError::TransportTimeout { server },
        _ => DomainError::TransportIo {
            server,
            reason: error.to_string(),
        },
    }
}

pub(crate) fn timeout_error(server: SocketAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}
