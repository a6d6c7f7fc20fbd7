use dnssec_probe_domain::Config;
use dnssec_probe_infrastructure::telemetry::{TelemetryEmitter, TelemetryWriter};
use tokio::task::JoinHandle;
use tracing::info;

/// Emitter handed to the use cases plus the writer task draining it.
pub struct Telemetry {
    pub emitter: TelemetryEmitter,
    writer: Option<JoinHandle<u64>>,
}

impl Telemetry {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        if !config.telemetry.enabled {
            return Ok(Self {
                emitter: TelemetryEmitter::new_disabled(),
                writer: None,
            });
        }

        let writer = match config.telemetry.output.as_deref() {
            Some(path) => TelemetryWriter::file(path)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to open telemetry output {}: {}", path, e))?,
            None => TelemetryWriter::stdout(),
        };

        let (emitter, rx) = TelemetryEmitter::new_enabled();
        Ok(Self {
            emitter,
            writer: Some(writer.start(rx)),
        })
    }

    /// Drops the last sender held here and waits for the writer to drain.
    pub async fn finish(self) -> anyhow::Result<()> {
        drop(self.emitter);
        if let Some(writer) = self.writer {
            let written = writer.await?;
            info!(events = written, "Telemetry written");
        }
        Ok(())
    }
}
