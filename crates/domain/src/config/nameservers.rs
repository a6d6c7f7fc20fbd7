use crate::dns_protocol::Nameserver;
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NameserverConfig {
    /// Fixed nameservers; when non-empty, host discovery is skipped.
    #[serde(default)]
    pub servers: Vec<String>,

    #[serde(default = "default_resolv_conf_path")]
    pub resolv_conf_path: String,
}

impl NameserverConfig {
    pub fn parsed_servers(&self) -> Result<Vec<Nameserver>, DomainError> {
        self.servers
            .iter()
            .map(|s| s.parse::<Nameserver>().map_err(DomainError::InvalidNameserver))
            .collect()
    }

    pub fn has_overrides(&self) -> bool {
        !self.servers.is_empty()
    }
}

impl Default for NameserverConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            resolv_conf_path: default_resolv_conf_path(),
        }
    }
}

fn default_resolv_conf_path() -> String {
    "/etc/resolv.conf".to_string()
}
