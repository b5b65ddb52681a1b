use anyhow::{Context, Result};
use folio_ingest::Pacing;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_config_path, ensure_folio_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vision: VisionSection,
    pub extract: ExtractSection,
    pub server: ServerSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionSection {
    /// OpenAI-compatible API root; `/chat/completions` is appended
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Wait between page requests, in milliseconds. 0 disables.
    pub pace_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: String,
    /// Request body cap; base64 page images are large
    pub max_body_mb: usize,
}

impl Default for VisionSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "meta-llama/llama-4-maverick-17b-128e-instruct".to_string(),
            max_tokens: 2000,
            api_key_env: "GROQ_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            pace_ms: Pacing::DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_body_mb: 50,
        }
    }
}

impl ExtractSection {
    pub fn pacing(&self) -> Pacing {
        Pacing::from_millis(self.pace_ms)
    }
}

impl ServerSection {
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb * 1024 * 1024
    }
}

/// `explicit` if given, else `~/.folio/config.toml`
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load the config file, falling back to defaults when it does not exist.
/// Missing keys take their default values.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write a default config unless one exists. Returns whether a file was written.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        _ => {
            ensure_folio_home()?;
        }
    }
    save_config(path, &Config::default())?;
    Ok(true)
}
