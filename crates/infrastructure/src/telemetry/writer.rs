use dnssec_probe_domain::ProbeEvent;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

type EventOutput = Box<dyn AsyncWrite + Send + Unpin>;

/// Drains the emitter channel and writes one JSON document per line.
pub struct TelemetryWriter {
    output: EventOutput,
}

impl TelemetryWriter {
    pub fn new(output: EventOutput) -> Self {
        Self { output }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(tokio::io::stdout()))
    }

    /// Appends to `path`, creating it when missing.
    pub async fn file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self::new(Box::new(file)))
    }

    /// Runs until every emitter is dropped; resolves to the number of events
    /// written.
    pub fn start(self, rx: mpsc::UnboundedReceiver<ProbeEvent>) -> tokio::task::JoinHandle<u64> {
        tokio::spawn(self.run(rx))
    }

    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<ProbeEvent>) -> u64 {
        debug!("TelemetryWriter: Starting consumer");
        let mut written = 0u64;

        while let Some(event) = rx.recv().await {
            match self.write_event(&event).await {
                Ok(()) => written += 1,
                Err(e) => warn!(error = %e, reason = %event.reason, "Failed to write telemetry event"),
            }
        }

        if let Err(e) = self.output.flush().await {
            warn!(error = %e, "Failed to flush telemetry output");
        }

        debug!(written, "TelemetryWriter: Consumer shutting down");
        written
    }

    async fn write_event(&mut self, event: &ProbeEvent) -> std::io::Result<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        self.output.write_all(&line).await
    }
}
