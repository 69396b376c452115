//! HTTP handlers
//!
//! | Route | Method | Handler |
//! |---|---|---|
//! | `/scrape` | GET | [`scrape_handler`] |
//! | `/csv` | POST | [`csv_handler`] |
//! | `/add-csv` | POST | [`add_csv_handler`] |
//! | `/download/:file_id` | GET | [`download_handler`] |
//! | `/health` | GET | [`health_handler`] |

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::crawler::CrawlRequest;
use crate::export::ExportStore;
use crate::report::{CrawlReport, ReportBatch};
use crate::server::{ApiError, AppState};
use crate::HarvestError;

#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    #[serde(rename = "targetUrl")]
    pub target_url: String,
    #[serde(default)]
    pub depth: u32,
}

#[derive(Debug, Deserialize)]
pub struct AddCsvParams {
    #[serde(rename = "fileId")]
    pub file_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FileIdResponse {
    #[serde(rename = "fileId")]
    pub file_id: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Crawls `targetUrl` to `depth` and returns the deduplicated report
pub async fn scrape_handler(
    State(state): State<AppState>,
    params: Result<Query<ScrapeParams>, QueryRejection>,
) -> Result<Json<CrawlReport>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if params.depth > state.max_depth {
        return Err(ApiError::BadRequest(format!(
            "depth must be at most {}, got {}",
            state.max_depth, params.depth
        )));
    }

    let request =
        CrawlRequest::new(&params.target_url, params.depth).map_err(HarvestError::from)?;

    let _permit = state
        .crawl_slots
        .acquire()
        .await
        .map_err(|_| ApiError::Unavailable("Crawler is shutting down".to_string()))?;

    let report = state.crawler.crawl(request).await?;
    Ok(Json(report))
}

/// Writes one report to a new export file
pub async fn csv_handler(
    State(state): State<AppState>,
    body: Result<Json<CrawlReport>, JsonRejection>,
) -> Result<Json<FileIdResponse>, ApiError> {
    let Json(report) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let file_id = ExportStore::new_file_id();
    state.store.append_reports(&file_id, &[report]).await?;

    Ok(Json(FileIdResponse { file_id }))
}

/// Appends one or more reports to an export file
///
/// With `?fileId=<id>` the rows go to that file (created if it does not
/// exist); without it a fresh id is generated.
pub async fn add_csv_handler(
    State(state): State<AppState>,
    params: Result<Query<AddCsvParams>, QueryRejection>,
    body: Result<Json<ReportBatch>, JsonRejection>,
) -> Result<Json<FileIdResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Json(batch) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let file_id = match params.file_id {
        Some(raw) => ExportStore::parse_file_id(&raw)?,
        None => ExportStore::new_file_id(),
    };

    state
        .store
        .append_reports(&file_id, &batch.into_reports())
        .await?;

    Ok(Json(FileIdResponse { file_id }))
}

/// Streams an export file back as an attachment
pub async fn download_handler(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let file_id = ExportStore::parse_file_id(&file_id)?;
    let bytes = state.store.read(&file_id).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                ExportStore::file_name(&file_id)
            ),
        ),
    ];

    Ok((headers, bytes))
}

/// Liveness probe
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
