use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::nameservers::NameserverConfig;
use super::probe::ProbeConfig;
use super::telemetry::TelemetryConfig;

/// Main configuration structure for the probe
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Query construction and retry budgets
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Where nameservers come from
    #[serde(default)]
    pub nameservers: NameserverConfig,

    /// Telemetry output
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnssec-probe.toml in current directory
    /// 3. /etc/dnssec-probe/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dnssec-probe.toml").exists() {
            Self::from_file("dnssec-probe.toml")?
        } else if std::path::Path::new("/etc/dnssec-probe/config.toml").exists() {
            Self::from_file("/etc/dnssec-probe/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if !overrides.nameservers.is_empty() {
            self.nameservers.servers = overrides.nameservers;
        }
        if let Some(attempts) = overrides.udp_attempts {
            self.probe.udp_attempts = attempts;
        }
        if let Some(output) = overrides.telemetry_output {
            self.telemetry.output = Some(output);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.udp_attempts == 0 {
            return Err(ConfigError::Validation(
                "udp_attempts must be at least 1".to_string(),
            ));
        }

        if self.probe.udp_timeout_ms == 0 || self.probe.tcp_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        if self.probe.udp_payload_size < 512 {
            return Err(ConfigError::Validation(format!(
                "udp_payload_size {} is below the 512-byte minimum",
                self.probe.udp_payload_size
            )));
        }

        if self.probe.apex_domain.trim().is_empty() || self.probe.smimea_domain.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "Probe domains cannot be empty".to_string(),
            ));
        }

        self.nameservers
            .parsed_servers()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub nameservers: Vec<String>,
    pub udp_attempts: Option<u32>,
    pub telemetry_output: Option<String>,
    pub log_level: Option<String>,
}
