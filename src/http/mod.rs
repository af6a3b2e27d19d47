//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID)
//!     → handlers.rs (/me: race the upstream, /health)
//!     → envelope.rs (success or failure JSON, identity.rs payload)
//!     → Send to client
//! ```

pub mod envelope;
pub mod handlers;
pub mod identity;
pub mod request;
pub mod server;

pub use envelope::{Envelope, FALLBACK_FACT};
pub use identity::{UserInfo, OWNER};
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
