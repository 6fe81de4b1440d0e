use std::sync::Arc;

use anyhow::Context;
use bookmatch_api::{
    api::{create_router, AppState},
    config::Config,
    services::{CatalogSource, CsvSource, JsonSource},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookmatch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let address = config.bind_address();

    // A configured CSV wins over the extracted artifact
    let source: Arc<dyn CatalogSource> = match &config.books_csv_path {
        Some(path) => Arc::new(CsvSource::new(path)),
        None => Arc::new(JsonSource::new(&config.catalog_path)),
    };

    let state = AppState::load(config, source.clone())
        .await
        .with_context(|| format!("Failed to load catalog from {}", source.describe()))?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
