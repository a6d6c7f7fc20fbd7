use crate::probe_plan::{ProbePlan, APEX_DOMAIN_NAME, SMIMEA_DOMAIN_NAME};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    #[serde(default = "default_apex_domain")]
    pub apex_domain: String,

    #[serde(default = "default_smimea_domain")]
    pub smimea_domain: String,

    /// UDP sends per nameserver (resolv.conf `attempts`).
    #[serde(default = "default_udp_attempts")]
    pub udp_attempts: u32,

    /// Wait for a single UDP response (resolv.conf `timeout`).
    #[serde(default = "default_timeout_ms")]
    pub udp_timeout_ms: u64,

    /// Bound on TCP connect and on the response read.
    #[serde(default = "default_timeout_ms")]
    pub tcp_timeout_ms: u64,

    /// Payload size advertised in the OPT record.
    #[serde(default = "default_udp_payload_size")]
    pub udp_payload_size: u16,
}

impl ProbeConfig {
    pub fn udp_timeout(&self) -> Duration {
        Duration::from_millis(self.udp_timeout_ms)
    }

    pub fn tcp_timeout(&self) -> Duration {
        Duration::from_millis(self.tcp_timeout_ms)
    }

    pub fn plan(&self) -> ProbePlan {
        ProbePlan::study(&self.apex_domain, &self.smimea_domain)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            apex_domain: default_apex_domain(),
            smimea_domain: default_smimea_domain(),
            udp_attempts: default_udp_attempts(),
            udp_timeout_ms: default_timeout_ms(),
            tcp_timeout_ms: default_timeout_ms(),
            udp_payload_size: default_udp_payload_size(),
        }
    }
}

fn default_apex_domain() -> String {
    APEX_DOMAIN_NAME.to_string()
}

fn default_smimea_domain() -> String {
    SMIMEA_DOMAIN_NAME.to_string()
}

fn default_udp_attempts() -> u32 {
    2
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_udp_payload_size() -> u16 {
    4096
}
