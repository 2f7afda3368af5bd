//! severityboard -- per-server error severity dashboard backend.
//!
//! Loads a daily error-indicator dataset, slices a trailing window ending at
//! a selected date, and classifies it into Critical/High/Moderate/Low
//! warnings. Exposed over a JSON API and the CLI.

pub mod api;
pub mod config;
pub mod dataset;
pub mod detect;
pub mod report;

use anyhow::{Context, Result};
use std::path::Path;

/// Load the dataset and serve the dashboard API until the process exits.
pub async fn serve(bind: &str, data_path: &Path, trailing_days: usize) -> Result<()> {
    // 1. Load the dataset once; every request shares it read-only
    tracing::info!(path = %data_path.display(), "Loading dataset");
    let dataset = dataset::Dataset::load_csv(data_path)
        .with_context(|| format!("Failed to load dataset {}", data_path.display()))?;

    // 2. Build the engine and router
    let engine = detect::engine::SeverityEngine::new(dataset, trailing_days);
    let app = api::router(api::state::AppState::new(engine));

    // 3. Start API server
    let addr: std::net::SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", bind))?;
    tracing::info!(%addr, trailing_days, "severityboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
