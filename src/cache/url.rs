// src/cache/url.rs

//! Two-tier cache of decoded JSON responses keyed by request URL.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::cache::{read_json, write_json};
use crate::error::Result;
use crate::utils::url::get_domain;

/// Memory map in front of one JSON file per URL.
pub struct UrlCache {
    dir: PathBuf,
    memory: Mutex<HashMap<String, Value>>,
}

impl UrlCache {
    /// Create an empty cache storing files under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            memory: Mutex::new(HashMap::new()),
        }
    }

    /// Deterministic disk location for a URL: `{dir}/{host}/{sha256}.json`.
    pub fn file_path(&self, url: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(url.as_bytes()));
        let host = get_domain(url).unwrap_or_else(|| "_".to_string());
        self.dir.join(host).join(format!("{digest}.json"))
    }

    /// Memory tier only.
    pub fn get_memory(&self, url: &str) -> Option<Value> {
        self.memory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Memory tier, then disk tier.
    ///
    /// A disk hit is promoted into memory so later lookups skip the file.
    pub async fn lookup(&self, url: &str) -> Result<Option<Value>> {
        if let Some(value) = self.get_memory(url) {
            log::debug!("URL cache hit (memory): {url}");
            return Ok(Some(value));
        }

        let path = self.file_path(url);
        match read_json::<Value>(&path).await? {
            Some(value) => {
                log::debug!("URL cache hit (disk): {}", path.display());
                self.remember(url, value.clone());
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Persist a fresh response to disk and memory.
    pub async fn store(&self, url: &str, value: &Value) -> Result<()> {
        let path = self.file_path(url);
        write_json(&path, value).await?;
        self.remember(url, value.clone());
        Ok(())
    }

    /// Number of responses held in memory.
    pub fn memory_len(&self) -> usize {
        self.memory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn remember(&self, url: &str, value: Value) {
        self.memory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), value);
    }
}
