use dnssec_probe_application::ports::MeasurementIdGenerator;
use std::sync::Arc;

/// Random version 4 UUID, rendered in the usual 8-4-4-4-12 form.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomMeasurementId;

impl RandomMeasurementId {
    pub fn new() -> Self {
        Self
    }
}

impl MeasurementIdGenerator for RandomMeasurementId {
    fn generate(&self) -> Arc<str> {
        let mut bytes = fastrand::u128(..).to_be_bytes();
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        Arc::from(format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        ))
    }
}
