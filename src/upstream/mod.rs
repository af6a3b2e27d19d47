//! Upstream fact provider.
//!
//! # Data Flow
//! ```text
//! /me handler
//!     → client.rs (GET upstream, raced against the deadline)
//!     → Ok(fact) or error.rs (Timeout / Status / Network / Decode)
//!     → envelope built by the http layer
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client per process
//! - No retries; every failure is terminal for the request
//! - The deadline covers the body as well as the headers

pub mod client;
pub mod error;

pub use client::FactClient;
pub use error::UpstreamError;
