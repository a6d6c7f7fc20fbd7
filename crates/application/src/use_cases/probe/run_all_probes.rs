use super::run_context::ProbeRun;
use super::send_tcp_query::SendTcpQueryUseCase;
use super::send_udp_query::SendUdpQueryUseCase;
use dnssec_probe_domain::{MeasurementState, Nameserver, ProbePlan};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case: walk the probe plan, UDP then TCP for every step.
///
/// Sends never overlap. An encode failure skips the rest of its step (the TCP
/// send after a failed UDP encode) and the run moves on.
pub struct RunAllProbesUseCase {
    send_udp: Arc<SendUdpQueryUseCase>,
    send_tcp: Arc<SendTcpQueryUseCase>,
    plan: ProbePlan,
}

impl RunAllProbesUseCase {
    pub fn new(
        send_udp: Arc<SendUdpQueryUseCase>,
        send_tcp: Arc<SendTcpQueryUseCase>,
        plan: ProbePlan,
    ) -> Self {
        Self {
            send_udp,
            send_tcp,
            plan,
        }
    }

    pub fn plan(&self) -> &ProbePlan {
        &self.plan
    }

    pub async fn execute(
        &self,
        measurement_id: Arc<str>,
        nameservers: &[Nameserver],
    ) -> MeasurementState {
        let mut run = ProbeRun::new(measurement_id);
        self.execute_in(&mut run, nameservers).await;
        run.into_state()
    }

    /// Runs the plan against an existing run context.
    pub async fn execute_in(&self, run: &mut ProbeRun, nameservers: &[Nameserver]) {
        info!(
            steps = self.plan.len(),
            nameservers = nameservers.len(),
            "Sending probe queries"
        );

        for step in self.plan.steps() {
            debug!(
                domain = %step.domain,
                record_type = %step.record_type,
                dnssec_ok = step.dnssec_ok,
                "Probing"
            );

            if let Err(e) = self
                .send_udp
                .execute(
                    run,
                    &step.domain,
                    nameservers,
                    step.record_type,
                    step.dnssec_ok,
                )
                .await
            {
                warn!(error = %e, record_type = %step.record_type, "Skipping TCP for this step");
                continue;
            }

            if let Err(e) = self
                .send_tcp
                .execute(
                    run,
                    &step.domain,
                    nameservers,
                    step.record_type,
                    step.dnssec_ok,
                )
                .await
            {
                warn!(error = %e, record_type = %step.record_type, "TCP step aborted");
            }
        }

        info!(
            total_attempts = run.state.total_attempts(),
            responses = run.state.responses_collected(),
            "Probe queries finished"
        );
    }
}
