//! calburn HTTP server
//!
//! Serves the calorie estimation API. Configuration comes from the calburn
//! config file; the fallback provider key comes from the environment.

use anyhow::Result;
use calorie_core::{get_default_catalog, Config, FallbackEstimator};
use calorie_server::{routes, AppState, OpenAiFallback};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    calorie_core::logging::init_with_level("calorie_server=info,calorie_core=info,tower_http=info");

    let config = Config::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting calburn server"
    );

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        anyhow::bail!("Invalid activity catalog: {}", errors.join("; "));
    }

    let fallback = OpenAiFallback::from_config(&config.fallback)
        .map(|provider| Arc::new(provider) as Arc<dyn FallbackEstimator>);
    info!(
        activities = catalog.len(),
        fallback_enabled = fallback.is_some(),
        "Catalog loaded"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(catalog, fallback, config);
    let app = routes::create_router(state);

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
