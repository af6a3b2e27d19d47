//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with `/me` and `/health`
//! - Wire up middleware (tracing, timeout, request ID, and for the
//!   hardened profile CORS and rate limiting)
//! - Serve on a listener until shutdown is signalled

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ServiceConfig, ServiceProfile};
use crate::http::handlers::{get_health, get_me};
use crate::http::request::UuidRequestId;
use crate::security::rate_limit::{self, FixedWindowLimiter};
use crate::security::{cors_layer, rate_limit_middleware};
use crate::upstream::{FactClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub facts: Arc<FactClient>,
    pub profile: ServiceProfile,
}

/// HTTP server for the fact proxy.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    limiter: Option<Arc<FixedWindowLimiter>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, UpstreamError> {
        let facts = Arc::new(FactClient::new(&config.upstream)?);

        let limiter = config
            .rate_limit_active()
            .then(|| Arc::new(FixedWindowLimiter::from_config(&config.rate_limit)));

        let state = AppState {
            facts,
            profile: config.profile,
        };

        let router = Self::build_router(&config, state, limiter.clone());
        Ok(Self {
            router,
            config,
            limiter,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        config: &ServiceConfig,
        state: AppState,
        limiter: Option<Arc<FixedWindowLimiter>>,
    ) -> Router {
        let mut router = Router::new()
            .route("/me", get(get_me))
            .route("/health", get(get_health))
            .with_state(state);

        if let Some(limiter) = limiter {
            router = router.layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));
        }

        if config.cors_active() {
            router = router.layer(cors_layer(&config.cors));
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            profile = %self.config.profile,
            upstream = %self.config.upstream.url,
            rate_limit = self.limiter.is_some(),
            cors = self.config.cors_active(),
            "HTTP server starting"
        );

        if let Some(limiter) = self.limiter.clone() {
            tokio::spawn(rate_limit::run_sweeper(limiter, shutdown.resubscribe()));
        }

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server(profile: ServiceProfile) -> HttpServer {
        let mut config = ServiceConfig::default();
        config.profile = profile;
        config.upstream.url = "http://127.0.0.1:9/fact".into();
        HttpServer::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_profile() {
        let response = server(ServiceProfile::Hardened)
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert!(response.headers().contains_key("ratelimit-limit"));

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["profile"], "hardened");
    }

    #[tokio::test]
    async fn test_basic_profile_has_no_limiter() {
        let server = server(ServiceProfile::Basic);
        assert!(server.limiter.is_none());

        let response = server
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(!response.headers().contains_key("ratelimit-limit"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = server(ServiceProfile::Basic)
            .router()
            .oneshot(Request::get("/you").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_client_request_id_is_kept() {
        let response = server(ServiceProfile::Basic)
            .router()
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }
}
