//! Engine types
//!
//! Configuration and results for a pagination session.

use crate::http::DEFAULT_REQUEST_INTERVAL;
use crate::output::SearchResult;
use crate::pagination::SessionState;
use std::time::Duration;

/// Wait after a transient server error
pub const DEFAULT_SERVER_ERROR_COOLDOWN: Duration = Duration::from_secs(30);

/// Wait after hitting the request-rate quota
pub const DEFAULT_RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(60);

/// How retried attempts are bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Every attempt counts toward `exit_after`; reaching it while retrying
    /// ends the session normally. Unbounded when no cap is set.
    #[default]
    CountAgainstCap,
    /// Retries leave the request cap alone; more than `max_retries`
    /// consecutive retries for one page is an error.
    Independent {
        /// Consecutive retries allowed per page
        max_retries: u32,
    },
}

/// Configuration for a pagination session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Request cap; `None` runs until the results run out
    pub exit_after: Option<u32>,
    /// Minimum spacing between dispatches
    pub min_request_interval: Duration,
    /// Cooldown for 5xx responses
    pub server_error_cooldown: Duration,
    /// Cooldown for 429 responses
    pub rate_limit_cooldown: Duration,
    /// Pause before re-sending after a network fault
    pub transport_retry_delay: Duration,
    /// Retry accounting
    pub retry_policy: RetryPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exit_after: None,
            min_request_interval: DEFAULT_REQUEST_INTERVAL,
            server_error_cooldown: DEFAULT_SERVER_ERROR_COOLDOWN,
            rate_limit_cooldown: DEFAULT_RATE_LIMIT_COOLDOWN,
            transport_retry_delay: Duration::ZERO,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new engine config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request cap
    #[must_use]
    pub fn with_exit_after(mut self, exit_after: Option<u32>) -> Self {
        self.exit_after = exit_after;
        self
    }

    /// Set the throttle interval
    #[must_use]
    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    /// Set both retry cooldowns
    #[must_use]
    pub fn with_cooldowns(mut self, server_error: Duration, rate_limit: Duration) -> Self {
        self.server_error_cooldown = server_error;
        self.rate_limit_cooldown = rate_limit;
        self
    }

    /// Set the pause before a network re-send
    #[must_use]
    pub fn with_transport_retry_delay(mut self, delay: Duration) -> Self {
        self.transport_retry_delay = delay;
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }
}

/// Counters from a finished session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Requests that got a response, retries included
    pub request_count: u32,
    /// Retried attempts
    pub retry_count: u32,
    /// Pages handed to the sink
    pub page_count: u32,
    /// Items received
    pub result_count: u64,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl SessionStats {
    /// Snapshot the counters of a session
    pub fn from_state(state: &SessionState, duration: Duration) -> Self {
        Self {
            request_count: state.request_count,
            retry_count: state.retry_count,
            page_count: state.page_count,
            result_count: state.result_count,
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// What `PaginationEngine::run` returns on `DONE`
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// Sink result (accumulation or `Emitted`)
    pub result: SearchResult,
    /// Newest ID to resume from
    pub newest_id: Option<String>,
    /// Session counters
    pub stats: SessionStats,
}
