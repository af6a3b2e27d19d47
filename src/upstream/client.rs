//! Fact client with a hard deadline.
//!
//! # Responsibilities
//! - Issue the single GET to the configured fact endpoint
//! - Race the whole exchange against the deadline
//! - Classify failures into `UpstreamError`

use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::time::timeout;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::error::UpstreamError;

/// Shape of a successful upstream body. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct UpstreamFact {
    fact: String,
}

/// Client for the upstream fact endpoint.
///
/// Cheap to share behind an `Arc`; the inner reqwest client pools connections.
#[derive(Debug, Clone)]
pub struct FactClient {
    http: reqwest::Client,
    url: Url,
    deadline: Duration,
}

impl FactClient {
    /// Build a client from validated configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let url = Url::parse(&config.url)?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("fact-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            url,
            deadline: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Fetch one fact.
    ///
    /// When the deadline wins the in-flight exchange is dropped and its
    /// eventual result is never observed.
    pub async fn fetch_fact(&self) -> Result<String, UpstreamError> {
        let started = Instant::now();

        let result = match timeout(self.deadline, self.exchange()).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.deadline)),
        };

        match &result {
            Ok(_) => {
                tracing::debug!(url = %self.url, elapsed = ?started.elapsed(), "Fact fetched");
                metrics::record_upstream("success", started);
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.url,
                    kind = e.kind(),
                    error = %e,
                    elapsed = ?started.elapsed(),
                    "Fact fetch failed"
                );
                metrics::record_upstream(e.kind(), started);
            }
        }

        result
    }

    async fn exchange(&self) -> Result<String, UpstreamError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(UpstreamError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await.map_err(UpstreamError::Network)?;
        let payload: UpstreamFact = serde_json::from_slice(&body)?;
        Ok(payload.fact)
    }
}
