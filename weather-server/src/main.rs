//! Binary crate for the weather proxy HTTP server.
//!
//! Startup order: init logging, load configuration from the environment
//! (fails fast when the API key is missing), build the upstream client,
//! then serve the single `/weather` route until the process stops.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use weather_core::{Config, OpenWeatherProvider};

mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let provider = OpenWeatherProvider::new(&config)?;

    let state = routes::AppState { provider: Arc::new(provider) };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "weather server listening");

    axum::serve(listener, routes::router(state))
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
