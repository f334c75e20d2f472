use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use calbridge_server::app;
use calbridge_server::config::AppConfig;
use calbridge_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let addr = config.listen_addr.clone();

    let state = AppState::from_config(config).context("Failed to set up providers")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("calbridge-server listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
