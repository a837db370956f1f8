//! Minimum inter-request spacing for the provider's free tier.
//!
//! The provider allows 5 requests per minute; the pacer spaces outbound
//! calls at least 12.1s apart and raises the floor to a full minute once
//! the provider signals a rate limit. Escalation is one-way and holds for
//! the rest of the process.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Base spacing derived from the 5-requests-per-minute ceiling.
pub const FREE_TIER_INTERVAL: Duration = Duration::from_millis(12_100);

/// Spacing applied after the provider reports a rate limit.
pub const ESCALATED_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct PacerState {
    last_dispatch: Option<Instant>,
    min_interval: Duration,
}

/// Shared request pacer; clones observe the same dispatch history.
#[derive(Debug, Clone)]
pub struct RequestPacer {
    state: Arc<Mutex<PacerState>>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(PacerState {
                last_dispatch: None,
                min_interval,
            })),
        }
    }

    pub fn free_tier() -> Self {
        Self::new(FREE_TIER_INTERVAL)
    }

    /// Suspends until the minimum interval since the previous dispatch has
    /// elapsed, then stamps the new dispatch time. The stamp happens after
    /// the wait, so back-to-back callers observe full spacing.
    pub async fn pace(&self) {
        let wait = {
            let state = self
                .state
                .lock()
                .expect("pacer state should not be poisoned");
            state
                .last_dispatch
                .map(|last| state.min_interval.saturating_sub(last.elapsed()))
                .unwrap_or(Duration::ZERO)
        };

        if !wait.is_zero() {
            tracing::debug!(wait_secs = wait.as_secs_f64(), "pacing outbound request");
            sleep(wait).await;
        }

        self.state
            .lock()
            .expect("pacer state should not be poisoned")
            .last_dispatch = Some(Instant::now());
    }

    /// Raises the spacing floor to [`ESCALATED_INTERVAL`]. Idempotent and
    /// never lowered again within the process.
    pub fn escalate(&self) {
        let mut state = self
            .state
            .lock()
            .expect("pacer state should not be poisoned");
        if state.min_interval < ESCALATED_INTERVAL {
            state.min_interval = ESCALATED_INTERVAL;
            tracing::warn!(
                "rate limit reported by provider; request spacing raised to {}s for the rest of the run",
                ESCALATED_INTERVAL.as_secs()
            );
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.state
            .lock()
            .expect("pacer state should not be poisoned")
            .min_interval
    }
}
