//! Readiness probe protocol
//!
//! The host widget mounts asynchronously, so the handle may not exist when
//! adaptation is requested - and may exist but not yet be wired up. The
//! probe re-runs detection on a bounded timer schedule and fails permanently
//! once the budget is spent.

use crate::adapter::PlayerAdapter;
use crate::config::AdapterConfig;
use crate::detect::detect;
use crate::error::{AdapterError, AdapterResult};
use crate::surface::HandleSource;
use log::{debug, warn};
use std::time::Duration;

/// Bounded fixed-interval probe schedule.
///
/// The default budget (5 attempts, 500 ms apart) is a policy constant the
/// host UIs were tuned against, not a correctness requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePolicy {
    max_attempts: usize,
    interval: Duration,
}

impl ProbePolicy {
    /// Creates a policy with the given attempt budget
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval: Duration::from_millis(500),
        }
    }

    /// Sets the delay between attempts
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Probes the source until detection succeeds, then binds an adapter.
///
/// Every attempt re-runs the full detection chain: a handle that exists but
/// matches no variant is treated the same as a missing one, since the
/// backend may still be wiring itself up.
pub async fn bind(source: &dyn HandleSource, config: &AdapterConfig) -> AdapterResult<PlayerAdapter> {
    let policy = &config.probe;

    for attempt in 1..=policy.max_attempts() {
        if let Some(handle) = source.handle() {
            if let Some(detected) = detect(&handle) {
                debug!(
                    "player handle controllable on probe {} as {:?}",
                    attempt,
                    detected.kind()
                );
                return Ok(PlayerAdapter::new(detected, config.clone()));
            }
            debug!("probe {}: handle present but not yet playable", attempt);
        } else {
            debug!("probe {}: no handle yet", attempt);
        }

        if attempt < policy.max_attempts() {
            tokio::time::sleep(policy.interval()).await;
        }
    }

    warn!(
        "player handle never became controllable after {} probes",
        policy.max_attempts()
    );
    Err(AdapterError::Unavailable {
        attempts: policy.max_attempts(),
    })
}
