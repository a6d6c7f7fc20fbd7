//! Mapping between `dnssec_probe_domain::RecordType` and `hickory_proto::rr::RecordType`.

use dnssec_probe_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// The experimental types have no hickory variant and go through the
    /// numeric `Unknown` path.
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::RRSIG => HickoryRecordType::RRSIG,
            RecordType::DNSKEY => HickoryRecordType::DNSKEY,
            RecordType::HTTPS => HickoryRecordType::HTTPS,
            RecordType::SMIMEA | RecordType::NEWONE | RecordType::NEWTWO => {
                HickoryRecordType::from(record_type.to_u16())
            }
        }
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
