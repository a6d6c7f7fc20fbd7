//! DNS query construction in wire format.
//!
//! Header, question and the EDNS0 OPT record all go through `hickory-proto`.
//! Every query carries exactly one OPT record advertising the configured
//! payload size, with the DO bit set on request.

use super::record_type_map::RecordTypeMapper;
use dnssec_probe_application::ports::QueryEncoder;
use dnssec_probe_domain::dns_message::frame_for_stream;
use dnssec_probe_domain::{DomainError, RecordType, TransportProtocol};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Payload size advertised in the OPT record unless configured otherwise.
pub const DEFAULT_UDP_PAYLOAD_SIZE: u16 = 4096;

/// Builds probe queries: RD set, one IN question, one OPT additional record.
#[derive(Debug, Clone, Copy)]
pub struct MessageBuilder {
    udp_payload_size: u16,
}

impl MessageBuilder {
    pub fn new(udp_payload_size: u16) -> Self {
        Self { udp_payload_size }
    }

    pub fn udp_payload_size(&self) -> u16 {
        self.udp_payload_size
    }

    /// Plain message for `transport`; framing is applied by the caller.
    pub fn build_query(
        &self,
        transport: TransportProtocol,
        domain: &str,
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<Vec<u8>, DomainError> {
        let encode_error = |reason: String| DomainError::EncodeFailed {
            transport,
            domain: domain.to_string(),
            reason,
        };

        let name = Name::from_str(domain)
            .map_err(|e| encode_error(format!("invalid domain name: {}", e)))?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.metadata.recursion_desired = true;
        message.add_query(query);
        message.set_edns(self.edns(dnssec_ok));

        Self::serialize_message(&message).map_err(encode_error)
    }

    fn edns(&self, dnssec_ok: bool) -> Edns {
        let mut edns = Edns::new();
        edns.set_max_payload(self.udp_payload_size)
            .set_dnssec_ok(dnssec_ok);
        edns
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, String> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| format!("failed to serialize DNS message: {}", e))?;

        Ok(buf)
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_UDP_PAYLOAD_SIZE)
    }
}

impl QueryEncoder for MessageBuilder {
    fn encode_udp(
        &self,
        domain: &str,
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<Vec<u8>, DomainError> {
        self.build_query(TransportProtocol::Udp, domain, record_type, dnssec_ok)
    }

    fn encode_tcp(
        &self,
        domain: &str,
        record_type: RecordType,
        dnssec_ok: bool,
    ) -> Result<Vec<u8>, DomainError> {
        let message = self.build_query(TransportProtocol::Tcp, domain, record_type, dnssec_ok)?;
        let len = message.len();
        frame_for_stream(&message).ok_or_else(|| DomainError::EncodeFailed {
            transport: TransportProtocol::Tcp,
            domain: domain.to_string(),
            reason: format!("message of {} bytes does not fit a stream frame", len),
        })
    }
}
