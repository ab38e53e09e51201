//! Response classification
//!
//! Maps a status code and body to the action the pagination loop takes.
//! Only two failure classes are recoverable, and they differ only in how
//! long to wait before re-sending. Everything else is fatal: re-sending the
//! same request unchanged cannot fix it.

use super::types::PageResponse;
use serde_json::Value;

/// What the pagination loop should do with a response
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx with a decodable page
    Success(PageResponse),
    /// Transient server fault; wait the short cooldown and re-send
    RetryServerError {
        /// Status code received
        status: u16,
    },
    /// Request quota exceeded; wait the long cooldown and re-send
    RetryRateLimited,
    /// Not recoverable by re-sending
    FatalClientError {
        /// Status code received
        status: u16,
        /// Message extracted from the body
        message: String,
    },
}

impl Outcome {
    /// Whether the same request should be sent again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RetryServerError { .. } | Self::RetryRateLimited)
    }
}

/// Classify an HTTP response
pub fn classify(status: u16, body: &[u8]) -> Outcome {
    if (200..300).contains(&status) {
        return match PageResponse::from_slice(body) {
            Ok(page) => Outcome::Success(page),
            Err(e) => Outcome::FatalClientError {
                status,
                message: e.to_string(),
            },
        };
    }

    if status == 429 {
        return Outcome::RetryRateLimited;
    }

    if is_transient_server_status(status) {
        return Outcome::RetryServerError { status };
    }

    Outcome::FatalClientError {
        status,
        message: error_message(body),
    }
}

/// Server statuses worth re-sending after a cooldown
fn is_transient_server_status(status: u16) -> bool {
    matches!(status, 500 | 502 | 503 | 504)
}

/// Pull a human-readable message out of an error body
pub fn error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).trim().to_string();

    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return if text.is_empty() {
            "empty response body".to_string()
        } else {
            text
        };
    };

    let candidates = [
        json.pointer("/errors/0/message"),
        json.get("detail"),
        json.get("title"),
        json.pointer("/error/message"),
        json.get("error"),
    ];

    let found = candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_str)
        .map(ToString::to_string);
    found.unwrap_or(text)
}
