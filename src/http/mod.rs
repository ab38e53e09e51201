//! HTTP module
//!
//! Provides the transport seam the pagination engine talks to, the reqwest
//! client behind it, and the request throttle.
//!
//! # Features
//!
//! - **Transport trait**: one `send` per page request, swappable for fakes
//! - **Throttle**: minimum spacing between consecutive dispatches
//! - **Authentication**: credentials applied to every request

mod client;
mod throttle;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use throttle::{Throttle, DEFAULT_REQUEST_INTERVAL};
pub use transport::{RawResponse, Transport};
