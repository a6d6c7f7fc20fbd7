pub mod probe;

// Re-export use cases
pub use probe::{
    MeasurementReport, ProbeRun, RunAllProbesUseCase, RunMeasurementUseCase,
    SendTcpQueryUseCase, SendUdpQueryUseCase,
};
