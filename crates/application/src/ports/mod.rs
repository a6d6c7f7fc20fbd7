mod dns_exchange;
mod measurement_id;
mod nameserver_source;
mod query_encoder;
mod telemetry_sink;

pub use dns_exchange::{TcpExchange, UdpExchange};
pub use measurement_id::MeasurementIdGenerator;
pub use nameserver_source::NameserverSource;
pub use query_encoder::QueryEncoder;
pub use telemetry_sink::TelemetrySink;
