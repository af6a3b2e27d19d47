//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! signals.rs:  SIGTERM/SIGINT → Shutdown::trigger
//! shutdown.rs: broadcast → server stops accepting, drains, sweeper exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
