// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::geoservice_repository::GeoServiceRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_json, health_check, index};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let app_config = load_app_config().context("Failed to load configuration")?;

    // Create the GeoService adapter (infrastructure layer)
    let repository = Arc::new(GeoServiceRepository::new(app_config.geoservice.clone())?);

    // Fetch once and build the dashboard (application layer)
    let dashboard_service = DashboardService::new(repository, app_config.map.clone());
    let dashboard = dashboard_service
        .load_dashboard()
        .await
        .context("Failed to load Deer Wintering Areas, dashboard not started")?;

    let state = Arc::new(AppState::from_dashboard(dashboard)?);

    // Build router (presentation layer)
    // Responses are Brotli-encoded by the handlers themselves, so no CompressionLayer here
    let router = Router::new()
        .route("/", get(index))
        .route("/api/dashboard", get(dashboard_json))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = app_config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Dashboard running on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
