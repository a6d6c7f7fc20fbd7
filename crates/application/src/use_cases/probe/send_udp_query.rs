use super::run_context::ProbeRun;
use crate::ports::{QueryEncoder, TelemetrySink, UdpExchange};
use dnssec_probe_domain::dns_message::{set_transaction_id, HEADER_LEN};
use dnssec_probe_domain::{
    AttemptKey, DomainError, Nameserver, ProbeEvent, ReasonCode, RecordType, TransportProtocol,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// resolv.conf default `attempts`.
pub const DEFAULT_UDP_ATTEMPTS: u32 = 2;

/// Use case: send one query over UDP with resolv.conf-style retransmission.
///
/// Every nameserver is tried once per round, for `attempts` rounds. The first
/// response from any nameserver ends the call.
pub struct SendUdpQueryUseCase {
    encoder: Arc<dyn QueryEncoder>,
    exchange: Arc<dyn UdpExchange>,
    telemetry: Arc<dyn TelemetrySink>,
    attempts: u32,
}

impl SendUdpQueryUseCase {
    pub fn new(
        encoder: Arc<dyn QueryEncoder>,
        exchange: Arc<dyn UdpExchange>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            encoder,
            exchange,
            telemetry,
            attempts: DEFAULT_UDP_ATTEMPTS,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Only an encode failure is returned; transport failures are reported to
    /// telemetry and leave the key without a response.
    pub async fn execute(
        &self,
        run: &mut ProbeRun,
        domain: &str,
        nameservers: &[Nameserver],
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<(), DomainError> {
        let key = AttemptKey::udp(record_type, dnssec_ok);

        let query = match self
            .encoder
            .encode_udp(domain, record_type, dnssec_ok)
            .and_then(|query| check_header(query, 0, TransportProtocol::Udp, domain))
        {
            Ok(query) => query,
            Err(e) => {
                let e = as_encode_error(e, TransportProtocol::Udp, domain);
                warn!(error = %e, key = %key, "UDP query encoding failed");
                self.telemetry
                    .submit(run.event(ProbeEvent::new(ReasonCode::UdpEncode)));
                return Err(e);
            }
        };

        for round in 1..=self.attempts {
            for nameserver in nameservers {
                let attempt = run.state.record_attempt(key);

                let mut message = query.clone();
                let stamped = set_transaction_id(&mut message, 0, self.encoder.transaction_id());
                debug_assert!(stamped, "header length is checked after encoding");

                match self
                    .exchange
                    .send_query(nameserver, &message, record_type)
                    .await
                {
                    Ok(response) => {
                        let response_len = response.len();
                        let stored = run.state.store_first_response(key, response);
                        debug!(
                            key = %key,
                            server = %nameserver,
                            round,
                            attempt,
                            response_len,
                            stored,
                            "UDP response received"
                        );
                        return Ok(());
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            key = %key,
                            server = %nameserver,
                            round,
                            attempt,
                            "UDP attempt failed"
                        );
                        self.telemetry.submit(run.event(ProbeEvent::attempt_failed(
                            e.attempt_reason(TransportProtocol::Udp),
                            &key,
                            attempt,
                        )));
                    }
                }
            }
        }

        debug!(
            key = %key,
            attempts = run.state.attempts(&key),
            "UDP attempts exhausted without a response"
        );
        Ok(())
    }
}

/// Rejects an encoded message too short to hold a header at `header_offset`;
/// every attempt must be able to carry its own transaction ID.
pub(super) fn check_header(
    message: Vec<u8>,
    header_offset: usize,
    transport: TransportProtocol,
    domain: &str,
) -> Result<Vec<u8>, DomainError> {
    if message.len() < header_offset + HEADER_LEN {
        return Err(DomainError::EncodeFailed {
            transport,
            domain: domain.to_string(),
            reason: format!(
                "encoded message of {} bytes has no room for a DNS header",
                message.len()
            ),
        });
    }
    Ok(message)
}

/// Normalizes whatever the encoder returned into `DomainError::EncodeFailed`.
pub(super) fn as_encode_error(
    error: DomainError,
    transport: TransportProtocol,
    domain: &str,
) -> DomainError {
    if error.is_encode_error() {
        return error;
    }
    DomainError::EncodeFailed {
        transport,
        domain: domain.to_string(),
        reason: error.to_string(),
    }
}
