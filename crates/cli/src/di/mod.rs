mod telemetry;
mod use_cases;

pub use telemetry::Telemetry;
pub use use_cases::UseCases;
