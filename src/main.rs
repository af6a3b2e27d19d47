//! Cat fact profile service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request         ┌──────────────────────────────────────────────┐
//!     ───────────────────────┼─▶ request id → trace → timeout               │
//!                            │      → [cors] → [rate limit]                 │
//!                            │      → /me handler ──── race ────┐           │
//!                            │                  │               ▼           │
//!                            │                  │        ┌────────────┐     │
//!                            │                  │        │ FactClient │─────┼──▶ Upstream
//!                            │                  │        └────────────┘     │
//!                            │                  │         deadline timer    │
//!     Client Response        │                  ▼                           │
//!     ◀──────────────────────┼── success / failure envelope                 │
//!                            └──────────────────────────────────────────────┘
//! ```
//!
//! Bracketed layers are mounted by the hardened profile.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use fact_proxy::config::{load_config, ServiceProfile};
use fact_proxy::lifecycle::{wait_for_signal, Shutdown};
use fact_proxy::observability::{logging, metrics};
use fact_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "fact-proxy", version)]
#[command(about = "Serves GET /me with a cat fact from the upstream API", long_about = None)]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the profile from the config file.
    #[arg(short, long, value_enum)]
    profile: Option<ServiceProfile>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), args.profile)?;

    logging::init_logging(&config.observability)?;

    tracing::info!("fact-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        profile = %config.profile,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        upstream_timeout_ms = config.upstream.timeout_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Server running");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let server = HttpServer::new(config)?;
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
