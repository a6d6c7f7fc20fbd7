use dnssec_probe_domain::{MeasurementState, ProbeEvent};
use std::sync::Arc;

/// Mutable state of one measurement run, threaded through every send.
#[derive(Debug, Clone)]
pub struct ProbeRun {
    pub measurement_id: Arc<str>,
    pub state: MeasurementState,
}

impl ProbeRun {
    pub fn new(measurement_id: Arc<str>) -> Self {
        Self {
            measurement_id,
            state: MeasurementState::new(),
        }
    }

    /// Tags `event` with this run's measurement ID.
    pub fn event(&self, event: ProbeEvent) -> ProbeEvent {
        event.with_measurement_id(self.measurement_id.clone())
    }

    pub fn into_state(self) -> MeasurementState {
        self.state
    }
}
