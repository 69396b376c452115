use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::{ExportError, HarvestError};

/// Errors returned by HTTP handlers
///
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Crawl(#[from] HarvestError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("{0}")]
    Unavailable(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Crawl(HarvestError::InvalidSeed(_)) => StatusCode::BAD_REQUEST,
            Self::Crawl(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Export(ExportError::InvalidFileId(_)) => StatusCode::BAD_REQUEST,
            Self::Export(ExportError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let timeout = ApiError::Crawl(HarvestError::Timeout {
            url: "https://example.com".to_string(),
        });
        assert_eq!(timeout.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(timeout.to_string(), "Timeout error scraping https://example.com.");

        let missing = ApiError::Export(ExportError::NotFound("id".to_string()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let bad_id = ApiError::Export(ExportError::InvalidFileId("..".to_string()));
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

        let bad_seed = ApiError::Crawl(HarvestError::InvalidSeed(crate::UrlError::MissingDomain));
        assert_eq!(bad_seed.status(), StatusCode::BAD_REQUEST);
    }
}
