#![allow(dead_code)]

use async_trait::async_trait;
use dnssec_probe_application::ports::{
    MeasurementIdGenerator, NameserverSource, QueryEncoder, TcpExchange, TelemetrySink,
    UdpExchange,
};
use dnssec_probe_domain::dns_message::frame_for_stream;
use dnssec_probe_domain::{DomainError, Nameserver, ProbeEvent, ReasonCode, RecordType};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

pub fn ns(addr: &str) -> Nameserver {
    addr.parse().unwrap()
}

pub fn timeout_error(server: &str) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}

// ── MockQueryEncoder ───────────────────────────────────────────────────────

/// Encodes a bare 12-byte header followed by the record type code and the DO
/// flag, enough for the use cases to stamp IDs into.
pub struct MockQueryEncoder {
    next_id: AtomicU16,
    failing_domains: Mutex<HashSet<String>>,
    fail_udp: Mutex<bool>,
    fail_tcp: Mutex<bool>,
    truncated: Mutex<bool>,
}

impl MockQueryEncoder {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU16::new(1),
            failing_domains: Mutex::new(HashSet::new()),
            fail_udp: Mutex::new(false),
            fail_tcp: Mutex::new(false),
            truncated: Mutex::new(false),
        }
    }

    pub fn fail_domain(&self, domain: &str) {
        self.failing_domains
            .lock()
            .unwrap()
            .insert(domain.to_string());
    }

    pub fn fail_udp(&self) {
        *self.fail_udp.lock().unwrap() = true;
    }

    pub fn fail_tcp(&self) {
        *self.fail_tcp.lock().unwrap() = true;
    }

    /// Emits messages shorter than a DNS header.
    pub fn truncate_messages(&self) {
        *self.truncated.lock().unwrap() = true;
    }

    fn message(
        &self,
        domain: &str,
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<Vec<u8>, DomainError> {
        if self.failing_domains.lock().unwrap().contains(domain) {
            return Err(DomainError::InvalidDomainName(domain.to_string()));
        }
        if *self.truncated.lock().unwrap() {
            return Ok(vec![0xAA, 0xBB, 0x01, 0x00]);
        }
        let mut msg = vec![0x00, 0x00, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0x01];
        msg.extend_from_slice(&record_type.to_u16().to_be_bytes());
        msg.push(dnssec_ok as u8);
        Ok(msg)
    }
}

impl Default for MockQueryEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEncoder for MockQueryEncoder {
    fn encode_udp(
        &self,
        domain: &str,
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<Vec<u8>, DomainError> {
        if *self.fail_udp.lock().unwrap() {
            return Err(DomainError::InvalidDomainName(domain.to_string()));
        }
        self.message(domain, record_type, dnssec_ok)
    }

    fn encode_tcp(
        &self,
        domain: &str,
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<Vec<u8>, DomainError> {
        if *self.fail_tcp.lock().unwrap() {
            return Err(DomainError::InvalidDomainName(domain.to_string()));
        }
        let msg = self.message(domain, record_type, dnssec_ok)?;
        Ok(frame_for_stream(&msg).unwrap())
    }

    fn transaction_id(&self) -> u16 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

// ── Scripted exchanges ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecordedSend {
    pub nameserver: Nameserver,
    pub bytes: Vec<u8>,
    pub record_type: Option<RecordType>,
}

/// Per-nameserver queues of outcomes; an empty queue answers with a timeout.
#[derive(Default)]
struct Script {
    outcomes: Mutex<HashMap<Nameserver, VecDeque<Result<Vec<u8>, DomainError>>>>,
    sends: Mutex<Vec<RecordedSend>>,
}

impl Script {
    fn push(&self, nameserver: &str, outcome: Result<Vec<u8>, DomainError>) {
        self.outcomes
            .lock()
            .unwrap()
            .entry(ns(nameserver))
            .or_default()
            .push_back(outcome);
    }

    fn next(
        &self,
        nameserver: &Nameserver,
        bytes: &[u8],
        record_type: Option<RecordType>,
    ) -> Result<Vec<u8>, DomainError> {
        self.sends.lock().unwrap().push(RecordedSend {
            nameserver: *nameserver,
            bytes: bytes.to_vec(),
            record_type,
        });
        self.outcomes
            .lock()
            .unwrap()
            .get_mut(nameserver)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(timeout_error(&nameserver.to_string())))
    }
}

#[derive(Default)]
pub struct ScriptedUdpExchange {
    script: Script,
}

impl ScriptedUdpExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, nameserver: &str, bytes: Vec<u8>) {
        self.script.push(nameserver, Ok(bytes));
    }

    pub fn fail(&self, nameserver: &str, error: DomainError) {
        self.script.push(nameserver, Err(error));
    }

    pub fn sends(&self) -> Vec<RecordedSend> {
        self.script.sends.lock().unwrap().clone()
    }
}

#[async_trait]
impl UdpExchange for ScriptedUdpExchange {
    async fn send_query(
        &self,
        nameserver: &Nameserver,
        query: &[u8],
        record_type: RecordType,
    ) -> Result<Vec<u8>, DomainError> {
        self.script.next(nameserver, query, Some(record_type))
    }
}

#[derive(Default)]
pub struct ScriptedTcpExchange {
    script: Script,
}

impl ScriptedTcpExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, nameserver: &str, bytes: Vec<u8>) {
        self.script.push(nameserver, Ok(bytes));
    }

    pub fn fail(&self, nameserver: &str, error: DomainError) {
        self.script.push(nameserver, Err(error));
    }

    pub fn sends(&self) -> Vec<RecordedSend> {
        self.script.sends.lock().unwrap().clone()
    }
}

#[async_trait]
impl TcpExchange for ScriptedTcpExchange {
    async fn exchange(
        &self,
        nameserver: &Nameserver,
        frame: &[u8],
    ) -> Result<Vec<u8>, DomainError> {
        self.script.next(nameserver, frame, None)
    }
}

// ── RecordingTelemetry ─────────────────────────────────────────────────────

pub struct RecordingTelemetry {
    events: Mutex<Vec<ProbeEvent>>,
    can_upload: bool,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            can_upload: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            can_upload: false,
            ..Self::new()
        }
    }

    pub fn events(&self) -> Vec<ProbeEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn reasons(&self) -> Vec<ReasonCode> {
        self.events().iter().map(|e| e.reason).collect()
    }
}

impl Default for RecordingTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn can_upload(&self) -> bool {
        self.can_upload
    }

    fn submit(&self, event: ProbeEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ── MockNameserverSource / FixedMeasurementId ──────────────────────────────

pub struct MockNameserverSource {
    result: Result<Vec<Nameserver>, DomainError>,
}

impl MockNameserverSource {
    pub fn with(addrs: &[&str]) -> Self {
        Self {
            result: Ok(addrs.iter().map(|a| ns(a)).collect()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl NameserverSource for MockNameserverSource {
    async fn read_nameservers(&self) -> Result<Vec<Nameserver>, DomainError> {
        self.result.clone()
    }
}

pub struct FixedMeasurementId(pub &'static str);

impl MeasurementIdGenerator for FixedMeasurementId {
    fn generate(&self) -> Arc<str> {
        Arc::from(self.0)
    }
}
