//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (hardened profile):
//!     → cors.rs (answer preflight, add Access-Control-* headers)
//!     → rate_limit.rs (count against the client's fixed window)
//!     → Pass to handler
//! ```
//!
//! # Design Decisions
//! - Both layers are mounted only when the profile or config asks for them
//! - Limited requests never reach the handler or the upstream

pub mod cors;
pub mod rate_limit;

pub use cors::cors_layer;
pub use rate_limit::{rate_limit_middleware, FixedWindowLimiter};
