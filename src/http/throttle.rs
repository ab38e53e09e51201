//! Request throttling
//!
//! Keeps consecutive dispatches at least a minimum interval apart. Built on
//! `tokio::time` so paused-clock tests observe the spacing exactly.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Minimum spacing between requests unless configured otherwise
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// Minimum-interval throttle owned by one session
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_dispatch: Option<Instant>,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_INTERVAL)
    }
}

impl Throttle {
    /// Create a throttle with the given minimum spacing
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: None,
        }
    }

    /// Wait out the rest of the interval, then record this dispatch
    pub async fn before_request(&mut self) {
        if let Some(last) = self.last_dispatch {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Throttling for {:?}", wait);
                tokio::time::sleep(wait).await;
            }
        }
        self.last_dispatch = Some(Instant::now());
    }

    /// Configured minimum spacing
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// When the previous request went out
    pub fn last_dispatch(&self) -> Option<Instant> {
        self.last_dispatch
    }
}
