//! Adapter configuration

use crate::probe::ProbePolicy;
use std::time::Duration;

/// Tuning knobs for handle probing and the polling fallback.
///
/// The defaults mirror the behavior the host UIs were built against; both
/// values are policy, not correctness requirements.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Readiness probe schedule
    pub probe: ProbePolicy,
    /// Interval between synthesized updates when no native event channel
    /// exists
    pub poll_interval: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            probe: ProbePolicy::default(),
            poll_interval: Duration::from_millis(200),
        }
    }
}

impl AdapterConfig {
    pub fn with_probe(mut self, probe: ProbePolicy) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(200));
        assert_eq!(config.probe.max_attempts(), 5);
    }

    #[test]
    fn test_builder() {
        let config = AdapterConfig::default()
            .with_poll_interval(Duration::from_millis(50))
            .with_probe(ProbePolicy::new(2));
        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert_eq!(config.probe.max_attempts(), 2);
    }
}
