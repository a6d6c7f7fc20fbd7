//! DNSSEC probe domain layer
pub mod config;
pub mod dns_message;
pub mod dns_protocol;
pub mod errors;
pub mod measurement;
pub mod probe_plan;
pub mod record_type;
pub mod telemetry;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_protocol::{Nameserver, TransportProtocol, DNS_PORT};
pub use errors::DomainError;
pub use measurement::{AttemptKey, MeasurementSnapshot, MeasurementState};
pub use probe_plan::{ProbePlan, ProbeStep, APEX_DOMAIN_NAME, SMIMEA_DOMAIN_NAME};
pub use record_type::RecordType;
pub use telemetry::{ProbeEvent, ReasonCode};
