//! Pagination engine module
//!
//! The request loop for one query.
//!
//! # Overview
//!
//! Each iteration builds the page request, waits on the throttle, sends it,
//! classifies the response and, on success, hands the page to the sink.
//! Server errors and rate limiting are absorbed with fixed cooldowns; a
//! network fault gets one re-send. The loop ends when a page carries no
//! continuation token, the request cap is reached, or a fatal error occurs.

mod types;

pub use types::{
    EngineConfig, RetryPolicy, SessionOutcome, SessionStats, DEFAULT_RATE_LIMIT_COOLDOWN,
    DEFAULT_SERVER_ERROR_COOLDOWN,
};

use crate::error::{Error, Result};
use crate::http::{RawResponse, Throttle, Transport};
use crate::output::PageSink;
use crate::pagination::{classify, Outcome, PageResponse, SessionState};
use crate::query::Query;
use crate::request::{PageRequest, RequestParameterBuilder, RequestRange};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Drives one pagination session at a time
pub struct PaginationEngine<T: Transport> {
    transport: T,
    builder: RequestParameterBuilder,
    config: EngineConfig,
}

impl<T: Transport> PaginationEngine<T> {
    /// Create an engine around a transport and a parameter builder
    pub fn new(transport: T, builder: RequestParameterBuilder) -> Self {
        Self {
            transport,
            builder,
            config: EngineConfig::default(),
        }
    }

    /// Set engine configuration
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the parameter builder
    pub fn builder(&self) -> &RequestParameterBuilder {
        &self.builder
    }

    /// Run one session for a query
    ///
    /// Pages already given to the sink stay there if the session aborts.
    pub async fn run(
        &self,
        query: &Query,
        range: &RequestRange,
        sink: &mut dyn PageSink,
    ) -> Result<SessionOutcome> {
        let start = Instant::now();
        let mut session = SessionState::new();
        let mut throttle = Throttle::new(self.config.min_request_interval);

        info!("Searching for: {}", query.value);

        loop {
            let request = self
                .builder
                .build(query, range, session.next_token.as_deref());

            let Some(page) = self
                .fetch_page(&request, &mut session, &mut throttle)
                .await?
            else {
                info!(
                    "Hit request threshold of {} requests while retrying",
                    session.request_count
                );
                break;
            };

            session.record_page(&page, range.since_id.as_deref());

            for entry in &page.errors {
                warn!("Partial failure on page {}: {}", session.page_count, entry);
            }

            sink.write_page(query, &page)?;

            debug!(
                "Page {}: {} items, next_token: {:?}",
                session.page_count,
                page.items().len(),
                page.next_token()
            );

            if !session.has_more() {
                break;
            }

            if self.cap_reached(&session) {
                info!(
                    "Hit request threshold of {} requests",
                    session.request_count
                );
                break;
            }
        }

        // A session that never got a page still resumes from where it started.
        let newest_id = session.newest_id.clone().or_else(|| range.since_id.clone());
        let result = sink.finish(newest_id.as_deref())?;
        let stats = SessionStats::from_state(&session, start.elapsed());

        info!(
            "Made {} data requests, received {} results",
            stats.request_count, stats.result_count
        );

        Ok(SessionOutcome {
            result,
            newest_id,
            stats,
        })
    }

    /// Fetch one logical page, absorbing retryable failures
    ///
    /// `None` means the request cap was reached while retrying.
    async fn fetch_page(
        &self,
        request: &PageRequest,
        session: &mut SessionState,
        throttle: &mut Throttle,
    ) -> Result<Option<PageResponse>> {
        let mut consecutive_retries = 0u32;

        loop {
            throttle.before_request().await;
            let response = self.dispatch(request, throttle).await?;
            session.record_request();

            let cooldown = match classify(response.status, &response.body) {
                Outcome::Success(page) => return Ok(Some(page)),
                Outcome::FatalClientError { status, message } => {
                    error!("{} error. {}", status, message);
                    return Err(Error::fatal_request(status, message));
                }
                Outcome::RetryServerError { status } => {
                    warn!(
                        "Server-side error ({}), sleeping for {:?} before retrying",
                        status, self.config.server_error_cooldown
                    );
                    self.config.server_error_cooldown
                }
                Outcome::RetryRateLimited => {
                    warn!(
                        "Hit request rate limit, sleeping for {:?} before retrying",
                        self.config.rate_limit_cooldown
                    );
                    self.config.rate_limit_cooldown
                }
            };

            session.record_retry();
            consecutive_retries += 1;

            match self.config.retry_policy {
                RetryPolicy::CountAgainstCap => {
                    if self.cap_reached(session) {
                        return Ok(None);
                    }
                }
                RetryPolicy::Independent { max_retries } => {
                    if consecutive_retries > max_retries {
                        return Err(Error::MaxRetriesExceeded { max_retries });
                    }
                }
            }

            tokio::time::sleep(cooldown).await;
        }
    }

    /// Send a request, re-sending once on a network fault
    async fn dispatch(&self, request: &PageRequest, throttle: &mut Throttle) -> Result<RawResponse> {
        match self.transport.send(request).await {
            Ok(response) => Ok(response),
            Err(e) if e.is_transient() => {
                warn!("Error occurred with request, retrying: {}", e);
                if !self.config.transport_retry_delay.is_zero() {
                    tokio::time::sleep(self.config.transport_retry_delay).await;
                }
                throttle.before_request().await;

                self.transport.send(request).await.map_err(|e| {
                    if e.is_transient() {
                        Error::transport(e.to_string())
                    } else {
                        e
                    }
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Whether the configured cap stops the session
    ///
    /// Under `Independent` only logical pages count toward the cap.
    fn cap_reached(&self, session: &SessionState) -> bool {
        let Some(cap) = self.config.exit_after else {
            return false;
        };
        let used = match self.config.retry_policy {
            RetryPolicy::CountAgainstCap => session.request_count,
            RetryPolicy::Independent { .. } => session.page_count,
        };
        used >= cap
    }
}

impl<T: Transport> std::fmt::Debug for PaginationEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationEngine")
            .field("builder", &self.builder)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
