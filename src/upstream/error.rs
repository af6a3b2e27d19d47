//! Upstream failure types.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while fetching a fact.
///
/// The `Display` text is what clients see in the envelope's `error` field.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The deadline fired before the exchange settled.
    #[error("Request timed out")]
    Timeout(Duration),

    /// The upstream answered with a non-success status.
    #[error("API failed")]
    Status(StatusCode),

    /// Connection, TLS or transfer failure.
    #[error("{0}")]
    Network(#[source] reqwest::Error),

    /// The body was not JSON or had no string `fact` field.
    #[error("invalid fact payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured endpoint is not a URL.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Status(_) => "status",
            UpstreamError::Network(_) => "network",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::InvalidUrl(_) | UpstreamError::Client(_) => "client",
        }
    }
}
