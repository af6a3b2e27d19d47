//! Route handlers.

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::http::envelope::{failure_status, Envelope};
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /me`: one upstream fact merged with the owner identity.
pub async fn get_me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    if state.profile.is_hardened() {
        tracing::info!(request_id = %request_id, "/me requested");
    } else {
        tracing::debug!(request_id = %request_id, "/me requested");
    }

    let (status, envelope) = match state.facts.fetch_fact().await {
        Ok(fact) => (StatusCode::OK, Envelope::success(fact, Utc::now())),
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                profile = %state.profile,
                error = %e,
                "Serving failure envelope"
            );
            (failure_status(state.profile), Envelope::failure(state.profile, &e))
        }
    };

    metrics::record_request("/me", status.as_u16(), start_time);
    (status, Json(envelope)).into_response()
}

/// `GET /health`: liveness without touching the upstream.
pub async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "profile": state.profile.as_str(),
    }))
}
