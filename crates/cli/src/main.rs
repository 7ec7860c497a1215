//! # Propcast Server
//!
//! HF propagation dashboard backend: aggregates solar, weather, spot, and
//! activation data behind a cached HTTP API.

mod bootstrap;
mod di;

use axum::Router;
use clap::Parser;
use propcast_api::create_api_routes;
use propcast_domain::CliOverrides;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Parser)]
#[command(name = "propcast")]
#[command(version)]
#[command(about = "HF propagation conditions dashboard server")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// HTTP server port
    #[arg(short = 'p', long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(
        cli.config.as_deref(),
        CliOverrides {
            bind_address: cli.bind,
            port: cli.port,
        },
    )?;
    bootstrap::init_logging(&config);

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid bind address: {e}"))?;

    let state = di::build_state(config);
    let scheduler = std::sync::Arc::clone(&state.scheduler);
    scheduler.start();

    let app = Router::new()
        .nest("/api", create_api_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Propcast API listening on http://{addr}/api");

    let serve_token = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { serve_token.cancelled().await })
        .await?;

    scheduler.stop().await;
    info!("Shutdown complete");

    Ok(())
}
