//! Page-by-page statement extraction.
//!
//! One vision call per page, strictly in input order, with the pacing
//! interval between calls. Responses are only decoded once every page has
//! been read; an upstream failure on any page aborts the whole run.

use std::sync::Arc;

use folio_core::ExtractionResult;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::pacing::Pacing;
use crate::page::merge_pages;
use crate::prompt::EXTRACTION_PROMPT;
use crate::vision::{VisionError, VisionModel};

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Malformed request; the caller's fault
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The vision capability failed on `page` (1-based)
    #[error("vision request for page {page} failed: {source}")]
    Upstream {
        page: usize,
        #[source]
        source: VisionError,
    },
}

/// Validated list of base64 page images, in statement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageBatch(Vec<String>);

impl ImageBatch {
    /// Validate a request body of the form `{ "images": ["<base64>", ...] }`.
    pub fn from_body(body: &Value) -> Result<Self, ExtractError> {
        let images = body
            .get("images")
            .and_then(Value::as_array)
            .ok_or_else(|| ExtractError::InvalidInput("No images provided".to_string()))?;

        images
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(Self)
            .ok_or_else(|| ExtractError::InvalidInput("images must be base64 strings".to_string()))
    }

    pub fn images(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone)]
pub struct Extractor {
    model: Arc<dyn VisionModel>,
    pacing: Pacing,
}

impl Extractor {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self {
            model,
            pacing: Pacing::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub async fn extract_batch(&self, batch: &ImageBatch) -> Result<ExtractionResult, ExtractError> {
        self.extract(batch.images()).await
    }

    /// Read every page, then merge. Pages whose text does not decode are
    /// skipped; an upstream error discards everything read so far.
    pub async fn extract(&self, images: &[String]) -> Result<ExtractionResult, ExtractError> {
        let responses = self.collect_responses(images).await?;
        let result = merge_pages(&responses);
        info!(
            pages = images.len(),
            transactions = result.transaction_count(),
            "extracted transactions"
        );
        Ok(result)
    }

    async fn collect_responses(&self, images: &[String]) -> Result<Vec<String>, ExtractError> {
        let mut responses = Vec::with_capacity(images.len());

        for (index, image) in images.iter().enumerate() {
            let page = index + 1;
            info!(page, total = images.len(), "extracting data from page");

            let text = self
                .model
                .describe_image(image, EXTRACTION_PROMPT)
                .await
                .map_err(|source| {
                    error!(page, error = %source, "vision request failed; aborting extraction");
                    ExtractError::Upstream { page, source }
                })?;
            responses.push(text);

            if page < images.len() {
                self.pacing.wait().await;
            }
        }

        Ok(responses)
    }
}
