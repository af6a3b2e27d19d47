//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that parse but cannot
//! work at runtime. All problems are reported, not just the first.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.url: {0}")]
    InvalidUpstreamUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("timeouts.request_secs ({request_ms} ms) must exceed upstream.timeout_ms ({upstream_ms} ms)")]
    RequestTimeoutTooShort { request_ms: u64, upstream_ms: u64 },

    #[error("cors.allowed_origins: invalid origin {0:?}")]
    InvalidOrigin(String),

    #[error("observability.log_level: unknown level {0:?}")]
    InvalidLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    match url::Url::parse(&config.upstream.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUpstreamUrl(format!(
            "unsupported scheme {:?}",
            url.scheme()
        ))),
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl(e.to_string())),
    }

    if config.upstream.timeout_ms == 0 {
        errors.push(ValidationError::Zero("upstream.timeout_ms"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    } else {
        let request_ms = config.timeouts.request_secs.saturating_mul(1000);
        if request_ms <= config.upstream.timeout_ms {
            errors.push(ValidationError::RequestTimeoutTooShort {
                request_ms,
                upstream_ms: config.upstream.timeout_ms,
            });
        }
    }

    if config.rate_limit_active() {
        if config.rate_limit.max_requests == 0 {
            errors.push(ValidationError::Zero("rate_limit.max_requests"));
        }
        if config.rate_limit.window_secs == 0 {
            errors.push(ValidationError::Zero("rate_limit.window_secs"));
        }
    }

    for origin in &config.cors.allowed_origins {
        if HeaderValue::from_str(origin).is_err() || url::Url::parse(origin).is_err() {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.observability.log_level.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
