//! HTTP error mapping
//!
//! Bad request bodies are 400; everything else, upstream failures included,
//! is 500. Bodies are always `{ "error": "<message>" }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_ingest::ExtractError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Extraction(ExtractError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Extraction(err) => {
                error!(error = %err, "error extracting transactions");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to extract transaction data".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
