mod run_all_probes;
mod run_context;
mod run_measurement;
mod send_tcp_query;
mod send_udp_query;

pub use run_all_probes::RunAllProbesUseCase;
pub use run_context::ProbeRun;
pub use run_measurement::{MeasurementReport, RunMeasurementUseCase};
pub use send_tcp_query::SendTcpQueryUseCase;
pub use send_udp_query::{SendUdpQueryUseCase, DEFAULT_UDP_ATTEMPTS};
