//! UDP exchange for probe queries (RFC 1035 §4.2.1)
//!
//! One datagram out, one datagram back, on a fresh ephemeral socket per
//! attempt. Retransmission across attempts and nameservers is the caller's job.

use super::{map_io_error, timeout_error, DEFAULT_TRANSPORT_TIMEOUT};
use async_trait::async_trait;
use dnssec_probe_application::ports::UdpExchange;
use dnssec_probe_domain::{DomainError, Nameserver, RecordType};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Largest UDP payload; a response is never cut short whatever the
/// advertised EDNS0 size.
pub const MAX_UDP_RESPONSE_SIZE: usize = u16::MAX as usize;

pub struct UdpTransport {
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSPORT_TIMEOUT)
    }
}

#[async_trait]
impl UdpExchange for UdpTransport {
    async fn send_query(
        &self,
        nameserver: &Nameserver,
        query: &[u8],
        record_type: RecordType,
    ) -> Result<Vec<u8>, DomainError> {
        let server_addr = nameserver.socket_addr();
        let bind_addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0));

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| map_io_error(server_addr, e))?;

        let bytes_sent = tokio::time::timeout(self.timeout, socket.send_to(query, server_addr))
            .await
            .map_err(|_| timeout_error(server_addr))?
            .map_err(|e| map_io_error(server_addr, e))?;

        debug!(
            server = %server_addr,
            record_type = %record_type,
            bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(self.timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| timeout_error(server_addr))?
                .map_err(|e| map_io_error(server_addr, e))?;

        if from_addr.ip() != server_addr.ip() {
            warn!(
                expected = %server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %server_addr,
            record_type = %record_type,
            bytes_received,
            "UDP response received"
        );

        Ok(recv_buf)
    }
}
