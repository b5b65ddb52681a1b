//! The vision capability the extractor depends on

use async_trait::async_trait;
use thiserror::Error;

/// Failure of the upstream vision capability. Never retried.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("vision request failed: {0}")]
    Transport(String),

    #[error("vision provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode vision response: {0}")]
    Decode(String),

    #[error("missing API key: set the {0} environment variable")]
    MissingCredentials(String),
}

/// Given one base64 image and a prompt, return the model's free-form text.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn describe_image(&self, image_base64: &str, prompt: &str) -> Result<String, VisionError>;
}
