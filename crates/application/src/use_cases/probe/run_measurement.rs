use super::run_all_probes::RunAllProbesUseCase;
use super::run_context::ProbeRun;
use crate::ports::{MeasurementIdGenerator, NameserverSource, TelemetrySink};
use dnssec_probe_domain::{DomainError, MeasurementState, Nameserver, ProbeEvent, ReasonCode};
use std::sync::Arc;
use tracing::{error, info};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct MeasurementReport {
    pub measurement_id: Arc<str>,
    pub nameservers: Vec<Nameserver>,
    pub state: MeasurementState,
}

/// Use case: one full measurement.
///
/// Start ping, nameserver discovery, every probe, completion ping carrying the
/// collected state. Discovery failures end the run before any query is sent.
pub struct RunMeasurementUseCase {
    nameservers: Arc<dyn NameserverSource>,
    ids: Arc<dyn MeasurementIdGenerator>,
    telemetry: Arc<dyn TelemetrySink>,
    run_all: Arc<RunAllProbesUseCase>,
}

impl RunMeasurementUseCase {
    pub fn new(
        nameservers: Arc<dyn NameserverSource>,
        ids: Arc<dyn MeasurementIdGenerator>,
        telemetry: Arc<dyn TelemetrySink>,
        run_all: Arc<RunAllProbesUseCase>,
    ) -> Self {
        Self {
            nameservers,
            ids,
            telemetry,
            run_all,
        }
    }

    /// Returns `Ok(None)` when telemetry cannot be uploaded and nothing ran.
    pub async fn execute(&self) -> Result<Option<MeasurementReport>, DomainError> {
        if !self.telemetry.can_upload() {
            info!("Telemetry upload disabled, skipping measurement");
            return Ok(None);
        }

        let mut run = ProbeRun::new(self.ids.generate());
        info!(measurement_id = %run.measurement_id, "Starting measurement");
        self.telemetry
            .submit(run.event(ProbeEvent::new(ReasonCode::Start)));

        let nameservers = self.discover(&run).await?;

        self.run_all.execute_in(&mut run, &nameservers).await;

        self.telemetry
            .submit(run.event(ProbeEvent::completed(run.state.snapshot())));
        info!(
            measurement_id = %run.measurement_id,
            total_attempts = run.state.total_attempts(),
            responses = run.state.responses_collected(),
            "Measurement completed"
        );

        Ok(Some(MeasurementReport {
            measurement_id: run.measurement_id.clone(),
            nameservers,
            state: run.into_state(),
        }))
    }

    async fn discover(&self, run: &ProbeRun) -> Result<Vec<Nameserver>, DomainError> {
        let result = match self.nameservers.read_nameservers().await {
            Ok(list) if list.is_empty() => Err(DomainError::NameserversNotFound),
            other => other,
        };

        match result {
            Ok(list) => {
                info!(count = list.len(), "Nameservers discovered");
                Ok(list)
            }
            Err(e) => {
                error!(error = %e, "Nameserver discovery failed");
                self.telemetry
                    .submit(run.event(ProbeEvent::new(e.discovery_reason())));
                Err(e)
            }
        }
    }
}
