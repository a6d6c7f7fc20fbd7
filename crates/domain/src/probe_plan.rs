use crate::record_type::RecordType;
use std::sync::Arc;

pub const APEX_DOMAIN_NAME: &str = "dnssec-experiment-moz.net";

pub const SMIMEA_DOMAIN_NAME: &str =
    "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2a._smimecert.dnssec-experiment-moz.net";

/// One (domain, type, DO) combination sent over UDP and then TCP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeStep {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub dnssec_ok: bool,
}

impl ProbeStep {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType, dnssec_ok: bool) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            dnssec_ok,
        }
    }
}

/// Ordered list of combinations probed by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePlan {
    steps: Vec<ProbeStep>,
}

impl ProbePlan {
    /// The study plan: every type in [`RecordType::ALL`] order, SMIMEA against
    /// its certificate owner name, `A` first with DO set and then without.
    pub fn study(apex_domain: &str, smimea_domain: &str) -> Self {
        let apex: Arc<str> = Arc::from(apex_domain);
        let smimea: Arc<str> = Arc::from(smimea_domain);
        let mut steps = Vec::with_capacity(RecordType::ALL.len() + 1);

        for record_type in RecordType::ALL {
            match record_type {
                RecordType::SMIMEA => {
                    steps.push(ProbeStep::new(smimea.clone(), record_type, false));
                }
                RecordType::A => {
                    steps.push(ProbeStep::new(apex.clone(), record_type, true));
                    steps.push(ProbeStep::new(apex.clone(), record_type, false));
                }
                _ => steps.push(ProbeStep::new(apex.clone(), record_type, false)),
            }
        }

        Self { steps }
    }

    pub fn from_steps(steps: Vec<ProbeStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProbeStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for ProbePlan {
    fn default() -> Self {
        Self::study(APEX_DOMAIN_NAME, SMIMEA_DOMAIN_NAME)
    }
}
