//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the fact proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Behaviour preset applied to failures and middleware defaults.
    pub profile: ServiceProfile,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream fact endpoint and its deadline.
    pub upstream: UpstreamConfig,

    /// Outer request timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Cross-origin settings.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Whether the rate limiter is mounted, falling back to the profile default.
    pub fn rate_limit_active(&self) -> bool {
        self.rate_limit.enabled.unwrap_or(self.profile.is_hardened())
    }

    /// Whether the CORS layer is mounted, falling back to the profile default.
    pub fn cors_active(&self) -> bool {
        self.cors.enabled.unwrap_or(self.profile.is_hardened())
    }
}

/// Behaviour preset for the `/me` handler.
///
/// `Basic` answers upstream failures with a plain 500 envelope. `Hardened`
/// answers with 502 plus a fallback fact, and turns on CORS, rate limiting
/// and per-request info logging unless overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServiceProfile {
    #[default]
    Basic,
    Hardened,
}

impl ServiceProfile {
    pub fn is_hardened(self) -> bool {
        matches!(self, ServiceProfile::Hardened)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceProfile::Basic => "basic",
            ServiceProfile::Hardened => "hardened",
        }
    }
}

impl std::fmt::Display for ServiceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Upstream fact provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Endpoint returning `{"fact": "..."}`.
    pub url: String,

    /// Deadline for the whole upstream exchange in milliseconds.
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://catfact.ninja/fact".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Fixed-window rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting. Unset means "follow the profile".
    pub enabled: Option<bool>,

    /// Requests allowed per client within one window.
    pub max_requests: u32,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            max_requests: 30,
            window_secs: 60,
        }
    }
}

/// Cross-origin resource sharing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable the CORS layer. Unset means "follow the profile".
    pub enabled: Option<bool>,

    /// Explicit origins to allow. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format for the fmt layer.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
