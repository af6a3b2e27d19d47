//! Identity attached to every successful `/me` response.

use serde::Serialize;

/// Owner of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub email: &'static str,
    pub name: &'static str,
    pub stack: &'static str,
}

pub const OWNER: UserInfo = UserInfo {
    email: "owner@example.com",
    name: "Fact Proxy Maintainer",
    stack: "Rust/Axum",
};
