use std::sync::Arc;

pub trait MeasurementIdGenerator: Send + Sync {
    fn generate(&self) -> Arc<str>;
}
