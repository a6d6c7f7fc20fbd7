use async_trait::async_trait;
use dnssec_probe_domain::{DomainError, Nameserver, RecordType};

/// Single UDP exchange: one datagram out, one datagram back.
///
/// Implementations bound the wait themselves and return
/// `DomainError::TransportTimeout` when no response arrives.
#[async_trait]
pub trait UdpExchange: Send + Sync {
    async fn send_query(
        &self,
        nameserver: &Nameserver,
        query: &[u8],
        record_type: RecordType,
    ) -> Result<Vec<u8>, DomainError>;
}

/// Single TCP exchange: connect, write the framed query, read one framed
/// response, close.
///
/// The returned bytes include the 2-byte length prefix.
#[async_trait]
pub trait TcpExchange: Send + Sync {
    async fn exchange(&self, nameserver: &Nameserver, frame: &[u8])
        -> Result<Vec<u8>, DomainError>;
}
