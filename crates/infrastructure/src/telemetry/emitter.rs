use dnssec_probe_application::ports::TelemetrySink;
use dnssec_probe_domain::ProbeEvent;
use tokio::sync::mpsc;
use tracing::debug;

/// Channel-backed telemetry sink. A disabled emitter reports that it cannot
/// upload, which skips the run.
#[derive(Clone)]
pub struct TelemetryEmitter {
    sender: Option<mpsc::UnboundedSender<ProbeEvent>>,
}

impl TelemetryEmitter {
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    pub fn new_enabled() -> (Self, mpsc::UnboundedReceiver<ProbeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let emitter = Self { sender: Some(tx) };
        (emitter, rx)
    }

    pub fn emit(&self, event: ProbeEvent) {
        if let Some(ref tx) = self.sender {
            if tx.send(event).is_err() {
                debug!("Telemetry writer gone, event dropped");
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl Default for TelemetryEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for TelemetryEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl TelemetrySink for TelemetryEmitter {
    fn can_upload(&self) -> bool {
        self.is_enabled()
    }

    fn submit(&self, event: ProbeEvent) {
        self.emit(event);
    }
}
