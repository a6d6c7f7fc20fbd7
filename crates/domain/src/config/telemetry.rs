use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// When false the probe has nowhere to report to and the run is skipped.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// JSON-lines file receiving the pings; stdout when unset.
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output: None,
        }
    }
}

fn default_true() -> bool {
    true
}
