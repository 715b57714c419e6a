//! `prm_server`: HTTP API for the hospitalisation risk calculator.
//!
//! Serves `POST /calculate` and `GET /health` on `PRM_BIND_ADDR`
//! (default `0.0.0.0:8080`) until interrupted.

use anyhow::{Context, Result};

use hch_prm::adapters::http;
use hch_prm::application::ScoringService;
use hch_prm::config::{LogMode, ServerConfig};
use hch_prm::{logging, ScoreEngine};

#[tokio::main]
async fn main() -> Result<()> {
    let _guard =
        logging::init_from_env(LogMode::Stdout, "info").context("failed to initialise logging")?;
    let server_config = ServerConfig::from_env()?;

    let service = ScoringService::<ScoreEngine>::default();
    tracing::info!("Starting PRM server with model {}", service.model_name());

    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind(server_config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", server_config.bind_addr))?;
    tracing::info!("Listening on {}", server_config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("PRM server shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
