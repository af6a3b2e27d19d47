//! Cat fact profile service.
//!
//! `GET /me` races one upstream fact request against a deadline and merges
//! the result with a fixed identity record.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod upstream;

pub use config::schema::{ServiceConfig, ServiceProfile};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
