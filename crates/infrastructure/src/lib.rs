//! Adapters for the probe's ports: hickory-based query encoding, tokio UDP and
//! TCP exchanges, nameserver discovery and telemetry output.
pub mod dns;
pub mod measurement_id;
pub mod system;
pub mod telemetry;
