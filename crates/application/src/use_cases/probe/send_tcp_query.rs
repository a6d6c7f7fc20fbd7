use super::run_context::ProbeRun;
use super::send_udp_query::{as_encode_error, check_header};
use crate::ports::{QueryEncoder, TcpExchange, TelemetrySink};
use dnssec_probe_domain::dns_message::{set_transaction_id, TCP_LENGTH_PREFIX_LEN};
use dnssec_probe_domain::{
    AttemptKey, DomainError, Nameserver, ProbeEvent, ReasonCode, RecordType, TransportProtocol,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case: send one query over TCP, one connection per nameserver.
///
/// TCP handles retransmission itself, so each nameserver gets a single attempt.
/// The first complete framed response ends the call.
pub struct SendTcpQueryUseCase {
    encoder: Arc<dyn QueryEncoder>,
    exchange: Arc<dyn TcpExchange>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl SendTcpQueryUseCase {
    pub fn new(
        encoder: Arc<dyn QueryEncoder>,
        exchange: Arc<dyn TcpExchange>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            encoder,
            exchange,
            telemetry,
        }
    }

    pub async fn execute(
        &self,
        run: &mut ProbeRun,
        domain: &str,
        nameservers: &[Nameserver],
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<(), DomainError> {
        let key = AttemptKey::tcp(record_type, dnssec_ok);

        let frame = match self
            .encoder
            .encode_tcp(domain, record_type, dnssec_ok)
            .and_then(|frame| {
                check_header(frame, TCP_LENGTH_PREFIX_LEN, TransportProtocol::Tcp, domain)
            }) {
            Ok(frame) => frame,
            Err(e) => {
                let e = as_encode_error(e, TransportProtocol::Tcp, domain);
                warn!(error = %e, key = %key, "TCP query encoding failed");
                self.telemetry
                    .submit(run.event(ProbeEvent::new(ReasonCode::TcpEncode)));
                return Err(e);
            }
        };

        for nameserver in nameservers {
            let attempt = run.state.record_attempt(key);

            let mut message = frame.clone();
            let stamped = set_transaction_id(
                &mut message,
                TCP_LENGTH_PREFIX_LEN,
                self.encoder.transaction_id(),
            );
            debug_assert!(stamped, "header length is checked after encoding");

            match self.exchange.exchange(nameserver, &message).await {
                Ok(response) => {
                    let response_len = response.len();
                    let stored = run.state.store_first_response(key, response);
                    debug!(
                        key = %key,
                        server = %nameserver,
                        attempt,
                        response_len,
                        stored,
                        "TCP response received"
                    );
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        key = %key,
                        server = %nameserver,
                        attempt,
                        "TCP attempt failed"
                    );
                    self.telemetry.submit(run.event(ProbeEvent::attempt_failed(
                        e.attempt_reason(TransportProtocol::Tcp),
                        &key,
                        attempt,
                    )));
                }
            }
        }

        debug!(
            key = %key,
            attempts = run.state.attempts(&key),
            "TCP attempts exhausted without a response"
        );
        Ok(())
    }
}
