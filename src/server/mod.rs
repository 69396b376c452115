//! HTTP surface of the harvester
//!
//! Builds the axum router over shared [`AppState`] and runs it together with
//! the scheduled uploads sweep.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{
    add_csv_handler, csv_handler, download_handler, health_handler, scrape_handler,
    FileIdResponse, ScrapeParams,
};

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::crawler::Crawler;
use crate::export::{start_cleanup_scheduler, ExportStore};

/// State shared by every handler
///
/// Holds no per-crawl data: each `/scrape` call gets its own coordinator.
#[derive(Clone)]
pub struct AppState {
    pub crawler: Crawler,
    pub store: Arc<ExportStore>,
    /// Caps the number of crawls running at once
    pub crawl_slots: Arc<Semaphore>,
    /// Highest depth accepted from callers
    pub max_depth: u32,
}

impl AppState {
    /// Builds state from configuration
    pub fn from_config(config: &Config) -> Result<Self, crate::HarvestError> {
        Ok(Self {
            crawler: Crawler::new(config)?,
            store: Arc::new(ExportStore::new(&config.export.uploads_dir)),
            crawl_slots: Arc::new(Semaphore::new(
                config.crawler.max_concurrent_crawls as usize,
            )),
            max_depth: config.crawler.max_depth,
        })
    }
}

/// Builds the application router
pub fn build_router(state: AppState, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/scrape", get(scrape_handler))
        .route("/csv", post(csv_handler))
        .route("/add-csv", post(add_csv_handler))
        .route("/download/:file_id", get(download_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the HTTP server until it fails
///
/// Starts the uploads sweep first; the scheduler is kept alive for the
/// lifetime of the server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config).context("Failed to build crawler")?;

    let _scheduler = start_cleanup_scheduler(state.store.clone(), &config.export.cleanup_schedule)
        .await
        .context("Failed to start uploads sweep")?;

    let app = build_router(state, config.server.body_limit_mb * 1024 * 1024);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
