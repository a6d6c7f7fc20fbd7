use async_trait::async_trait;
use dnssec_probe_application::ports::NameserverSource;
use dnssec_probe_domain::{DomainError, Nameserver};
use std::net::IpAddr;
use std::str::FromStr;
use tracing::{debug, warn};

pub const DEFAULT_RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// System resolver configuration reader (reads /etc/resolv.conf)
pub struct ResolvConfReader {
    path: String,
}

impl ResolvConfReader {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_RESOLV_CONF_PATH.to_string())
    }

    pub fn with_path(path: String) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for ResolvConfReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameserverSource for ResolvConfReader {
    #[cfg(unix)]
    async fn read_nameservers(&self) -> Result<Vec<Nameserver>, DomainError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DomainError::NameserversNotFound,
                _ => DomainError::NameserverRead(format!("{}: {}", self.path, e)),
            })?;

        let nameservers = parse_resolv_conf(&content);
        debug!(path = %self.path, count = nameservers.len(), "resolv.conf parsed");
        Ok(nameservers)
    }

    #[cfg(not(unix))]
    async fn read_nameservers(&self) -> Result<Vec<Nameserver>, DomainError> {
        Err(DomainError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}

/// Extracts IPv4 `nameserver` entries in file order.
///
/// Lines starting with `#` or `;` are comments. IPv6 entries are skipped since
/// the probe only speaks IPv4.
pub fn parse_resolv_conf(content: &str) -> Vec<Nameserver> {
    let mut nameservers = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let mut fields = line.split_whitespace();
        if fields.next() != Some("nameserver") {
            continue;
        }

        let Some(value) = fields.next() else {
            warn!(line, "nameserver line without address");
            continue;
        };

        match IpAddr::from_str(value) {
            Ok(IpAddr::V4(ip)) => nameservers.push(Nameserver::new(ip)),
            Ok(IpAddr::V6(_)) => debug!(value, "Skipping IPv6 nameserver"),
            // scoped IPv6, e.g. fe80::1%eth0
            Err(_) if value.contains(':') => debug!(value, "Skipping IPv6 nameserver"),
            Err(e) => warn!(error = %e, value, "Invalid nameserver address"),
        }
    }

    nameservers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::Ipv4Addr;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_keeps_order_and_skips_noise() {
        let content = r#"# Generated by NetworkManager
search lan
nameserver 192.168.1.1
; legacy comment
nameserver   9.9.9.9   # trailing
nameserver 2001:4860:4860::8888
nameserver fe80::1%eth0
nameserver not-an-ip
options edns0
nameserver 1.1.1.1
"#;

        let servers = parse_resolv_conf(content);
        let rendered: Vec<String> = servers.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["192.168.1.1", "9.9.9.9", "1.1.1.1"]);
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(parse_resolv_conf("").is_empty());
        assert!(parse_resolv_conf("search example.com\n").is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"nameserver 10.0.0.1\nnameserver 10.0.0.2\n")
            .unwrap();
        temp_file.flush().unwrap();

        let reader = ResolvConfReader::with_path(temp_file.path().to_str().unwrap().to_string());
        let servers = reader.read_nameservers().await.unwrap();

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].ip(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(servers[1].port(), 53);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let reader = ResolvConfReader::with_path("/nonexistent/resolv.conf".to_string());
        let result = reader.read_nameservers().await;

        assert_eq!(result, Err(DomainError::NameserversNotFound));
    }
}
