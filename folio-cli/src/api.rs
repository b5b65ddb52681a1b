//! HTTP routes
//!
//! - `POST /api/extract-transactions` with `{ "images": ["<base64>", ...] }`
//! - `GET /health`

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use folio_core::ExtractionResult;
use folio_ingest::{Extractor, ImageBatch};
use serde::Serialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
            startup_time: Utc::now(),
        }
    }
}

/// POST /api/extract-transactions
///
/// 200 with the merged result (pages that failed to decode are skipped),
/// 400 for a malformed or oversized body, 500 when the vision provider fails.
pub async fn extract_transactions(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<ExtractionResult>> {
    let body = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("request body is not JSON: {e}")))?;
    let batch = ImageBatch::from_body(&body)?;

    info!(pages = batch.len(), "extract request");
    let result = state.extractor.extract_batch(&batch).await?;
    Ok(Json(result))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub build: String,
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);

    Json(HealthResponse {
        status: "ok".to_string(),
        service: "folio".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: env!("FOLIO_BUILD_SHA").to_string(),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
    })
}

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/extract-transactions", post(extract_transactions))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
