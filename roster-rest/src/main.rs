use anyhow::{Context, Result};
use roster_core::backend::resolve_backend;
use roster_core::conf::config::read_config;
use roster_core::extensions::loader::{backend_entries, load_backends};
use roster_rest::{router, AppState};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config/config.yaml"));
    let config = read_config(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let registry = load_backends(&backend_entries(&config))
        .context("failed to load solver backend extensions")?;
    let registry = Arc::new(registry);
    let backend = resolve_backend(&config, &registry)?;

    let app = router(AppState { backend, registry });
    let rest_port = config.rest_port();
    let listener = TcpListener::bind(("0.0.0.0", rest_port)).await?;
    tracing::info!(port = rest_port, "roster rest listening");
    axum::serve(listener, app).await?;
    Ok(())
}
