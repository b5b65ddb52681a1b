//! OpenAI-compatible chat-completions client for page images (Groq by default)

use anyhow::{Context, Result};
use async_trait::async_trait;
use folio_ingest::{VisionError, VisionModel};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::VisionSection;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MsgOut,
}

#[derive(Debug, Deserialize)]
struct MsgOut {
    content: Option<String>,
}

/// Page images are always sent as JPEG data URLs.
fn build_request(model: &str, max_tokens: u32, image_base64: &str, prompt: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: json!([
                { "type": "text", "text": prompt },
                {
                    "type": "image_url",
                    "image_url": { "url": format!("data:image/jpeg;base64,{image_base64}") }
                }
            ]),
        }],
        max_tokens,
    }
}

/// First choice's text; empty when the provider returned none.
fn completion_text(resp: ChatResponse) -> String {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default()
}

pub struct VisionClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    api_key: Option<String>,
    api_key_env: String,
}

impl VisionClient {
    /// Build a client from config, reading the API key from the configured
    /// environment variable. A missing key is reported on first use.
    pub fn from_config(cfg: &VisionSection) -> Result<Self> {
        let api_key = std::env::var(&cfg.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!(var = %cfg.api_key_env, "no API key in environment; vision requests will fail");
        }
        Self::new(cfg, api_key)
    }

    pub fn new(cfg: &VisionSection, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build HTTP client")?;

        let endpoint = format!("{}/chat/completions", cfg.base_url.trim_end_matches('/'));
        info!(endpoint = %endpoint, model = %cfg.model, "vision client configured");

        Ok(Self {
            client,
            endpoint,
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            api_key,
            api_key_env: cfg.api_key_env.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl VisionModel for VisionClient {
    async fn describe_image(&self, image_base64: &str, prompt: &str) -> Result<String, VisionError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| VisionError::MissingCredentials(self.api_key_env.clone()))?;

        let body = build_request(&self.model, self.max_tokens, image_base64, prompt);
        debug!(model = %self.model, image_bytes = image_base64.len(), "sending vision request");

        let resp = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {key}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(VisionError::Status {
                status: status.as_u16(),
                body: txt,
            });
        }

        let out: ChatResponse = resp
            .json()
            .await
            .map_err(|e| VisionError::Decode(e.to_string()))?;
        Ok(completion_text(out))
    }
}
