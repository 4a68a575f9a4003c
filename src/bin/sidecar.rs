use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::{error, info};
use std::net::SocketAddr;
use std::time::Duration;

use roundtable::core::Config;
use roundtable::server::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env().context("invalid configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting conversation sidecar...");
    info!(
        "🤖 Completion backend: {} | Model: {}",
        config.base_url, config.model
    );

    let state = AppState::from_config(&config).context("failed to build completion client")?;

    // Periodically drop idle rate limit entries
    let limiter = state.limiter.clone();
    let prune_every = config.rate_limit_window.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(prune_every);
        loop {
            interval.tick().await;
            limiter.prune();
        }
    });

    let app = router(state, &config.allowed_origin)?;
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        "📡 Listening on http://{addr} | Allowed origin: {}",
        config.allowed_origin
    );

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Sidecar stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
