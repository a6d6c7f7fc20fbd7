use dnssec_probe_domain::{DomainError, RecordType};

pub trait QueryEncoder: Send + Sync {
    /// Plain DNS message for a datagram.
    fn encode_udp(
        &self,
        domain: &str,
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<Vec<u8>, DomainError>;

    /// DNS message preceded by its 2-byte big-endian length.
    fn encode_tcp(
        &self,
        domain: &str,
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<Vec<u8>, DomainError>;

    /// ID stamped into each attempt's copy of the query.
    fn transaction_id(&self) -> u16 {
        fastrand::u16(..)
    }
}
