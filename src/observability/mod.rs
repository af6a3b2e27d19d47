//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, upstream client, limiter produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to handler log events
//! - Metrics are optional and cheap when disabled

pub mod logging;
pub mod metrics;
