use async_trait::async_trait;
use dnssec_probe_domain::{DomainError, Nameserver};

#[async_trait]
pub trait NameserverSource: Send + Sync {
    /// Nameservers in configuration order.
    async fn read_nameservers(&self) -> Result<Vec<Nameserver>, DomainError>;
}
