use dnssec_probe_domain::ProbeEvent;

pub trait TelemetrySink: Send + Sync {
    /// Whether submitted events go anywhere. A run is skipped when this is false.
    fn can_upload(&self) -> bool {
        true
    }

    fn submit(&self, event: ProbeEvent);
}
