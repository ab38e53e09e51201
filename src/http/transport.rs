//! Transport seam between the pagination engine and the network

use crate::error::Result;
use crate::request::PageRequest;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use std::sync::Arc;

/// An HTTP response as the engine sees it
///
/// Any status code is a valid response here; deciding what it means is the
/// classifier's job.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Undecoded body
    pub body: Bytes,
}

impl RawResponse {
    /// Create a response without headers
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Create a response with a JSON body
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one page request and returns whatever came back
///
/// A connection-level failure is an `Err`; an HTTP error status is not.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch a single request
    async fn send(&self, request: &PageRequest) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &PageRequest) -> Result<RawResponse> {
        (**self).send(request).await
    }
}
