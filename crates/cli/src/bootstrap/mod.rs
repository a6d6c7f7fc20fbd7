use dnssec_probe_domain::config::LogFormat;
use dnssec_probe_domain::{CliOverrides, Config};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, overrides).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
}

/// Logs go to stderr; stdout is reserved for telemetry lines.
pub fn init_logging(config: &Config) {
    let level = config
        .logging
        .level
        .parse::<Level>()
        .unwrap_or(Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match config.logging.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
