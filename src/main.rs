// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::poller::Poller;
use crate::application::sample_source::SampleSource;
use crate::infrastructure::config::{load_app_config, AppConfig};
use crate::infrastructure::file_source::FileSampleSource;
use crate::infrastructure::http_source::HttpSampleSource;
use crate::infrastructure::svg_chart::ChartStyle;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_state, health_check, index};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("battery_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create sample source (infrastructure layer)
    let source = build_source(&config)?;

    // Start polling (application layer)
    let poller = Poller::spawn(source, config.poll.interval());

    // Create application state
    let state = Arc::new(AppState {
        snapshots: poller.subscribe(),
        title: config.chart.title.clone(),
        style: ChartStyle {
            width: config.chart.width,
            height: config.chart.height,
            stroke: config.chart.stroke.clone(),
        },
        refresh_secs: config.poll.interval_secs,
    });

    // Build router (presentation layer); anything else is served from the public dir
    let router = Router::new()
        .route("/", get(index))
        .route("/api/chart", get(chart_state))
        .route("/healthz", get(health_check))
        .fallback_service(ServeDir::new(&config.server.public_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting battery-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.shutdown().await;
    Ok(())
}

fn build_source(config: &AppConfig) -> anyhow::Result<Arc<dyn SampleSource>> {
    let source: Arc<dyn SampleSource> = match &config.source.file {
        Some(path) => Arc::new(FileSampleSource::new(path.clone())),
        None => Arc::new(HttpSampleSource::new(
            config.source.url.clone(),
            config.source.timeout(),
        )?),
    };
    Ok(source)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // keep serving without graceful shutdown
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
