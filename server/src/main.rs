use anyhow::{Context, Result};
use axum::serve;
use tracing::info;
use providence_server::{create_router, initialize_backend, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; `log` records from the library are forwarded too
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::load()?;
    info!("Data directory: {}", config.data_directory.display());

    let app_state = initialize_backend(&config).await?;
    let router = create_router(app_state, config.cors_origin.as_deref());

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Élevage la Providence API listening on http://{}", config.bind_address);

    serve(listener, router).await.context("Axum server error")?;
    Ok(())
}
