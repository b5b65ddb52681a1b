use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `~/.folio`, where the config file lives
pub fn folio_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".folio"))
}

pub fn ensure_folio_home() -> Result<PathBuf> {
    let dir = folio_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(folio_home()?.join("config.toml"))
}
