//! Encore server binary
//!
//! Loads configuration, wires the application context, and serves the
//! HTTP API.

use std::sync::Arc;

use encore_api::{context::AppContext, routes};
use encore_domain::{Config, EncoreError, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match encore_infra::config::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "no configuration found, using defaults");
            Config::default()
        }
    };

    let bind_addr = config.server.bind_addr.clone();
    let context = Arc::new(AppContext::new(config)?);
    context.health_check()?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| EncoreError::Internal(format!("failed to bind {bind_addr}: {err}")))?;
    info!(addr = %bind_addr, "listening");

    axum::serve(listener, routes::router(context))
        .await
        .map_err(|err| EncoreError::Internal(format!("server error: {err}")))
}
