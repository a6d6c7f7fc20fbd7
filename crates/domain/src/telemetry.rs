use crate::dns_protocol::TransportProtocol;
use crate::measurement::{AttemptKey, MeasurementSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Reason carried by every telemetry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    #[serde(rename = "STUDY_START")]
    Start,
    #[serde(rename = "STUDY_MEASUREMENT_COMPLETED")]
    MeasurementCompleted,
    #[serde(rename = "STUDY_ERROR_UDP_MISC")]
    UdpMisc,
    #[serde(rename = "STUDY_ERROR_TCP_MISC")]
    TcpMisc,
    #[serde(rename = "STUDY_ERROR_UDP_ENCODE")]
    UdpEncode,
    #[serde(rename = "STUDY_ERROR_TCP_ENCODE")]
    TcpEncode,
    #[serde(rename = "STUDY_ERROR_NAMESERVERS_OS_NOT_SUPPORTED")]
    NameserversOsNotSupported,
    #[serde(rename = "STUDY_ERROR_NAMESERVERS_NOT_FOUND")]
    NameserversNotFound,
    #[serde(rename = "STUDY_ERROR_NAMESERVERS_MISC")]
    NameserversMisc,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::Start => "STUDY_START",
            ReasonCode::MeasurementCompleted => "STUDY_MEASUREMENT_COMPLETED",
            ReasonCode::UdpMisc => "STUDY_ERROR_UDP_MISC",
            ReasonCode::TcpMisc => "STUDY_ERROR_TCP_MISC",
            ReasonCode::UdpEncode => "STUDY_ERROR_UDP_ENCODE",
            ReasonCode::TcpEncode => "STUDY_ERROR_TCP_ENCODE",
            ReasonCode::NameserversOsNotSupported => "STUDY_ERROR_NAMESERVERS_OS_NOT_SUPPORTED",
            ReasonCode::NameserversNotFound => "STUDY_ERROR_NAMESERVERS_NOT_FOUND",
            ReasonCode::NameserversMisc => "STUDY_ERROR_NAMESERVERS_MISC",
        }
    }

    pub fn encode_error(transport: TransportProtocol) -> Self {
        match transport {
            TransportProtocol::Udp => ReasonCode::UdpEncode,
            TransportProtocol::Tcp => ReasonCode::TcpEncode,
        }
    }

    pub fn misc_error(transport: TransportProtocol) -> Self {
        match transport {
            TransportProtocol::Udp => ReasonCode::UdpMisc,
            TransportProtocol::Tcp => ReasonCode::TcpMisc,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, ReasonCode::Start | ReasonCode::MeasurementCompleted)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One telemetry ping.
///
/// Serializes with the field names the collection pipeline expects
/// (`measurementID`, `errorRRTYPE`, `errorAttempt`, `dnsData`, `dnsAttempts`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeEvent {
    pub reason: ReasonCode,

    #[serde(rename = "measurementID", skip_serializing_if = "Option::is_none", default)]
    pub measurement_id: Option<Arc<str>>,

    #[serde(rename = "errorRRTYPE", skip_serializing_if = "Option::is_none", default)]
    pub error_rrtype: Option<String>,

    #[serde(rename = "errorAttempt", skip_serializing_if = "Option::is_none", default)]
    pub error_attempt: Option<u32>,

    #[serde(flatten, default)]
    pub snapshot: Option<MeasurementSnapshot>,
}

impl ProbeEvent {
    pub fn new(reason: ReasonCode) -> Self {
        Self {
            reason,
            measurement_id: None,
            error_rrtype: None,
            error_attempt: None,
            snapshot: None,
        }
    }

    /// Failed attempt for `key`, tagged with the counter value at failure.
    pub fn attempt_failed(reason: ReasonCode, key: &AttemptKey, attempt: u32) -> Self {
        Self {
            error_rrtype: Some(key.record_tag()),
            error_attempt: Some(attempt),
            ..Self::new(reason)
        }
    }

    pub fn completed(snapshot: MeasurementSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            ..Self::new(ReasonCode::MeasurementCompleted)
        }
    }

    pub fn with_measurement_id(mut self, id: Arc<str>) -> Self {
        self.measurement_id = Some(id);
        self
    }
}
