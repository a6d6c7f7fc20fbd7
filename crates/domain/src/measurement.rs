use crate::dns_protocol::TransportProtocol;
use crate::record_type::RecordType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identity of one probed combination: transport, record type and DO bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptKey {
    pub transport: TransportProtocol,
    pub record_type: RecordType,
    pub dnssec_ok: bool,
}

impl AttemptKey {
    pub fn new(transport: TransportProtocol, record_type: RecordType, dnssec_ok: bool) -> Self {
        Self {
            transport,
            record_type,
            dnssec_ok,
        }
    }

    pub fn udp(record_type: RecordType, dnssec_ok: bool) -> Self {
        Self::new(TransportProtocol::Udp, record_type, dnssec_ok)
    }

    pub fn tcp(record_type: RecordType, dnssec_ok: bool) -> Self {
        Self::new(TransportProtocol::Tcp, record_type, dnssec_ok)
    }

    /// Record type tag without the transport, e.g. `A`, `ADO`, `SMIMEA`.
    pub fn record_tag(&self) -> String {
        if self.dnssec_ok {
            format!("{}DO", self.record_type.as_str())
        } else {
            self.record_type.as_str().to_string()
        }
    }

    /// Full key label, e.g. `udpADO`, `tcpHTTPS`.
    pub fn label(&self) -> String {
        format!("{}{}", self.transport.key_prefix(), self.record_tag())
    }

    /// Every key a run can touch: both transports, each record type, and the
    /// DO variant of `A`.
    pub fn all() -> Vec<AttemptKey> {
        let mut keys = Vec::with_capacity(2 * (RecordType::ALL.len() + 1));
        for transport in [TransportProtocol::Udp, TransportProtocol::Tcp] {
            for record_type in RecordType::ALL {
                keys.push(AttemptKey::new(transport, record_type, false));
                if record_type == RecordType::A {
                    keys.push(AttemptKey::new(transport, record_type, true));
                }
            }
        }
        keys
    }
}

impl fmt::Display for AttemptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Responses and attempt counters collected during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementState {
    responses: BTreeMap<AttemptKey, Vec<u8>>,
    attempt_counts: BTreeMap<AttemptKey, u32>,
}

impl MeasurementState {
    /// Creates a state with every known key's counter at zero.
    pub fn new() -> Self {
        let attempt_counts = AttemptKey::all().into_iter().map(|k| (k, 0)).collect();
        Self {
            responses: BTreeMap::new(),
            attempt_counts,
        }
    }

    /// Increments the counter for `key` and returns the new value.
    pub fn record_attempt(&mut self, key: AttemptKey) -> u32 {
        let count = self.attempt_counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Stores `bytes` unless a response is already held for `key`.
    ///
    /// Returns `true` when the bytes were stored.
    pub fn store_first_response(&mut self, key: AttemptKey, bytes: Vec<u8>) -> bool {
        if self.has_response(&key) {
            return false;
        }
        self.attempt_counts.entry(key).or_insert(0);
        self.responses.insert(key, bytes);
        true
    }

    pub fn has_response(&self, key: &AttemptKey) -> bool {
        self.responses.get(key).is_some_and(|r| !r.is_empty())
    }

    pub fn response(&self, key: &AttemptKey) -> Option<&[u8]> {
        self.responses.get(key).map(Vec::as_slice)
    }

    pub fn attempts(&self, key: &AttemptKey) -> u32 {
        self.attempt_counts.get(key).copied().unwrap_or(0)
    }

    pub fn total_attempts(&self) -> u32 {
        self.attempt_counts.values().sum()
    }

    pub fn responses_collected(&self) -> usize {
        self.responses.values().filter(|r| !r.is_empty()).count()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AttemptKey> {
        self.attempt_counts.keys()
    }

    /// Label-keyed copy of the state, with an empty array for every key that
    /// has no response.
    pub fn snapshot(&self) -> MeasurementSnapshot {
        let mut dns_data = BTreeMap::new();
        let mut dns_attempts = BTreeMap::new();

        for (key, count) in &self.attempt_counts {
            let label = key.label();
            let bytes = self.responses.get(key).cloned().unwrap_or_default();
            dns_data.insert(label.clone(), bytes);
            dns_attempts.insert(label, *count);
        }

        MeasurementSnapshot {
            dns_data,
            dns_attempts,
        }
    }
}

/// Serializable form of [`MeasurementState`] carried by the completion event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementSnapshot {
    #[serde(rename = "dnsData")]
    pub dns_data: BTreeMap<String, Vec<u8>>,

    #[serde(rename = "dnsAttempts")]
    pub dns_attempts: BTreeMap<String, u32>,
}
