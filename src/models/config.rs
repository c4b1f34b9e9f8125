//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Wiki connection settings
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Local cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Batch export behavior
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base_url = self.wiki.base_url.trim();
        if base_url.is_empty() {
            return Err(AppError::validation("wiki.base_url is empty"));
        }
        url::Url::parse(base_url)
            .map_err(|e| AppError::validation(format!("wiki.base_url is invalid: {e}")))?;
        if base_url.ends_with('/') {
            return Err(AppError::validation(
                "wiki.base_url must not end with a slash",
            ));
        }
        if self.wiki.user_agent.trim().is_empty() {
            return Err(AppError::validation("wiki.user_agent is empty"));
        }
        if self.wiki.timeout_secs == 0 {
            return Err(AppError::validation("wiki.timeout_secs must be > 0"));
        }
        if self.cache.dir.as_os_str().is_empty() {
            return Err(AppError::validation("cache.dir is empty"));
        }
        if self.batch.max_concurrent == 0 {
            return Err(AppError::validation("batch.max_concurrent must be > 0"));
        }
        Ok(())
    }
}

/// Wiki connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Base URL of the wiki, without trailing slash
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Local cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding cached API responses and `images.json`
    #[serde(default = "defaults::cache_dir")]
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: defaults::cache_dir(),
        }
    }
}

/// Batch export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum pages processed at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Delay between completed pages in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Keep only the first N sentences of each description (0 keeps all)
    #[serde(default)]
    pub description_sentences: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: defaults::max_concurrent(),
            request_delay_ms: defaults::request_delay(),
            description_sentences: 0,
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Wiki defaults
    pub fn base_url() -> String {
        "https://baldursgate.fandom.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; itemwiki/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Cache defaults
    pub fn cache_dir() -> PathBuf {
        PathBuf::from("_cache")
    }

    // Batch defaults
    pub fn max_concurrent() -> usize {
        5
    }
    pub fn request_delay() -> u64 {
        0
    }
}
