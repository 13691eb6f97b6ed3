//! Brevia — document summarization server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("BREVIA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = brevia_core::BreviaConfig::from_env(&data_dir)?;
    let port = config.port;

    let state = Arc::new(AppState::new(config));
    if state.llm.read().resolve_provider().is_none() {
        warn!("No LLM credential configured; summarization will be unavailable");
    }

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Brevia server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
