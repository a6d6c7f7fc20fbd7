pub mod emitter;
pub mod writer;

pub use emitter::TelemetryEmitter;
pub use writer::TelemetryWriter;
