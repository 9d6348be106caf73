//! # Configuration
//!
//! Resolves the service base URL and request timeout. Precedence, first wins:
//! command line, environment (both via clap), config file, built-in default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const CONFIG_DIR_NAME: &str = "green-ledger";
const CONFIG_FILE_NAME: &str = "config.json";

/// Shape of `config.json`. Unknown keys are rejected to catch typos.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Option<Duration>,
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.config_dir().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Missing file is not an error; unreadable or malformed is.
pub fn read_config_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse config file {}", path.display()))
}

pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn resolve(cli_url: Option<&str>, cli_timeout_secs: Option<u64>, file: FileConfig) -> Config {
    let api_url = cli_url
        .and_then(normalize_base_url)
        .or_else(|| file.api_url.as_deref().and_then(normalize_base_url))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let timeout = cli_timeout_secs
        .or(file.timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);
    Config { api_url, timeout }
}

pub fn load(args: &Args) -> Result<Config> {
    let file = match args.config.as_deref() {
        Some(path) => read_config_file(Path::new(path))?,
        None => match default_config_path() {
            Some(path) => read_config_file(&path)?,
            None => FileConfig::default(),
        },
    };
    Ok(resolve(args.api_url.as_deref(), args.timeout_secs, file))
}
