use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lyrics_scraper::{
    Extractor, Settings,
    routers::{AppState, build_router},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let settings = Settings::from_env();
    info!(
        "fetch delay {:?}..{:?}, timeout {:?}",
        settings.fetch.delay_min, settings.fetch.delay_max, settings.fetch.timeout
    );

    let extractor = Extractor::new(&settings.base_url, settings.fetch.clone())
        .context("failed to build extractor")?;
    let state = AppState::new(extractor);
    let shutdown = state.shutdown.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port))
        .await
        .with_context(|| format!("failed to bind port {}", settings.port))?;

    info!("🎵 Lyrics scraper listening on {}", listener.local_addr()?);
    info!("📄 Song endpoint: /song?artist=&song=");
    info!("💿 Discography endpoint: /discography?artist=");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutting down, cancelling in-flight extractions");
            shutdown.cancel();
        })
        .await
        .context("server error")?;

    Ok(())
}
