//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, PORT override)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow an empty or missing file
//! - Profile-dependent switches stay `None` until resolved against the profile

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{
    CorsConfig, ListenerConfig, LogFormat, ObservabilityConfig, RateLimitConfig, ServiceConfig,
    ServiceProfile, TimeoutConfig, UpstreamConfig,
};
