use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource-record types covered by a measurement run.
///
/// `NEWONE` and `NEWTWO` are experimental types with no IANA assignment; they
/// are sent with codes from the private-use range (RFC 6895 §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    A,
    RRSIG,
    DNSKEY,
    SMIMEA,
    HTTPS,
    NEWONE,
    NEWTWO,
}

impl RecordType {
    /// Probe order of a measurement run.
    pub const ALL: [RecordType; 7] = [
        RecordType::A,
        RecordType::RRSIG,
        RecordType::DNSKEY,
        RecordType::SMIMEA,
        RecordType::HTTPS,
        RecordType::NEWONE,
        RecordType::NEWTWO,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::RRSIG => "RRSIG",
            RecordType::DNSKEY => "DNSKEY",
            RecordType::SMIMEA => "SMIMEA",
            RecordType::HTTPS => "HTTPS",
            RecordType::NEWONE => "NEWONE",
            RecordType::NEWTWO => "NEWTWO",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::RRSIG => 46,
            RecordType::DNSKEY => 48,
            RecordType::SMIMEA => 53,
            RecordType::HTTPS => 65,
            RecordType::NEWONE => 65280,
            RecordType::NEWTWO => 65281,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            46 => Some(RecordType::RRSIG),
            48 => Some(RecordType::DNSKEY),
            53 => Some(RecordType::SMIMEA),
            65 => Some(RecordType::HTTPS),
            65280 => Some(RecordType::NEWONE),
            65281 => Some(RecordType::NEWTWO),
            _ => None,
        }
    }

    pub fn is_experimental(&self) -> bool {
        matches!(self, RecordType::NEWONE | RecordType::NEWTWO)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "RRSIG" => Ok(RecordType::RRSIG),
            "DNSKEY" => Ok(RecordType::DNSKEY),
            "SMIMEA" => Ok(RecordType::SMIMEA),
            "HTTPS" => Ok(RecordType::HTTPS),
            "NEWONE" => Ok(RecordType::NEWONE),
            "NEWTWO" => Ok(RecordType::NEWTWO),
            _ => Err(format!("Unknown record type: {}", s)),
        }
    }
}
