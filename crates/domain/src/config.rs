pub mod errors;
pub mod logging;
pub mod nameservers;
pub mod probe;
pub mod root;
pub mod telemetry;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use nameservers::NameserverConfig;
pub use probe::ProbeConfig;
pub use root::{CliOverrides, Config};
pub use telemetry::TelemetryConfig;
