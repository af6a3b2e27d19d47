//! JSON envelopes returned by `/me`.
//!
//! Every body carries a `status` discriminator: `"success"` or `"error"`.

use axum::http::StatusCode;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::ServiceProfile;
use crate::http::identity::{UserInfo, OWNER};
use crate::upstream::UpstreamError;

/// Fact served by the hardened profile when the upstream is unavailable.
pub const FALLBACK_FACT: &str = "Cats sleep for most of the day — usually 12 to 16 hours!";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        user: UserInfo,
        timestamp: String,
        fact: String,
    },
    Error {
        message: &'static str,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<&'static str>,
    },
}

impl Envelope {
    pub fn success(fact: String, now: DateTime<Utc>) -> Self {
        Envelope::Success {
            user: OWNER,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            fact,
        }
    }

    pub fn failure(profile: ServiceProfile, cause: &UpstreamError) -> Self {
        Envelope::Error {
            message: failure_message(profile),
            error: cause.to_string(),
            fallback: fallback_fact(profile),
        }
    }
}

/// HTTP status used for failure envelopes.
pub fn failure_status(profile: ServiceProfile) -> StatusCode {
    match profile {
        ServiceProfile::Basic => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceProfile::Hardened => StatusCode::BAD_GATEWAY,
    }
}

fn failure_message(profile: ServiceProfile) -> &'static str {
    match profile {
        ServiceProfile::Basic => "Failed to fetch cat fact",
        ServiceProfile::Hardened => "Could not fetch cat fact",
    }
}

fn fallback_fact(profile: ServiceProfile) -> Option<&'static str> {
    match profile {
        ServiceProfile::Basic => None,
        ServiceProfile::Hardened => Some(FALLBACK_FACT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_success_shape() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let body = serde_json::to_value(Envelope::success("Cats have five toes.".into(), now)).unwrap();

        assert_eq!(
            body,
            json!({
                "status": "success",
                "user": {
                    "email": OWNER.email,
                    "name": OWNER.name,
                    "stack": OWNER.stack,
                },
                "timestamp": "2026-10-18T09:30:00.000Z",
                "fact": "Cats have five toes.",
            })
        );
    }

    #[test]
    fn test_basic_failure_has_no_fallback() {
        let cause = UpstreamError::Timeout(Duration::from_secs(5));
        let body = serde_json::to_value(Envelope::failure(ServiceProfile::Basic, &cause)).unwrap();

        assert_eq!(
            body,
            json!({
                "status": "error",
                "message": "Failed to fetch cat fact",
                "error": "Request timed out",
            })
        );
        assert_eq!(failure_status(ServiceProfile::Basic), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_hardened_failure_carries_fallback() {
        let cause = UpstreamError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_value(Envelope::failure(ServiceProfile::Hardened, &cause)).unwrap();

        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Could not fetch cat fact");
        assert_eq!(body["error"], "API failed");
        assert_eq!(body["fallback"], FALLBACK_FACT);
        assert_eq!(failure_status(ServiceProfile::Hardened), StatusCode::BAD_GATEWAY);
    }
}
