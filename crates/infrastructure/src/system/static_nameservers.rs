use async_trait::async_trait;
use dnssec_probe_application::ports::NameserverSource;
use dnssec_probe_domain::{DomainError, Nameserver};

/// Fixed nameserver list, used when the configuration names servers directly.
#[derive(Debug, Clone)]
pub struct StaticNameservers {
    nameservers: Vec<Nameserver>,
}

impl StaticNameservers {
    pub fn new(nameservers: Vec<Nameserver>) -> Self {
        Self { nameservers }
    }
}

#[async_trait]
impl NameserverSource for StaticNameservers {
    async fn read_nameservers(&self) -> Result<Vec<Nameserver>, DomainError> {
        Ok(self.nameservers.clone())
    }
}
