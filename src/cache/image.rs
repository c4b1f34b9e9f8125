// src/cache/image.rs

//! Resolved image URLs, persisted as a single `images.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::cache::{read_json, write_json};
use crate::error::Result;

/// base URL → normalized image name → resolved URL
pub type ImageMap = BTreeMap<String, BTreeMap<String, String>>;

/// Lazily loaded, write-through image URL cache.
pub struct ImageCache {
    path: PathBuf,
    entries: Mutex<Option<ImageMap>>,
    /// Held across snapshot and write so the file always gets the newest map
    persist: tokio::sync::Mutex<()>,
}

impl ImageCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
            persist: tokio::sync::Mutex::new(()),
        }
    }

    /// Cache file inside a cache directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("images.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a resolved URL, loading the file on first use.
    pub async fn get(&self, base_url: &str, name: &str) -> Option<String> {
        self.ensure_loaded().await;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|map| map.get(base_url))
            .and_then(|images| images.get(name))
            .cloned()
    }

    /// Record a resolution and rewrite the whole file.
    pub async fn insert(&self, base_url: &str, name: &str, url: &str) -> Result<()> {
        self.ensure_loaded().await;
        let _persist = self.persist.lock().await;
        let snapshot = {
            let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            let map = guard.get_or_insert_with(ImageMap::new);
            map.entry(base_url.to_string())
                .or_default()
                .insert(name.to_string(), url.to_string());
            map.clone()
        };
        write_json(&self.path, &snapshot).await
    }

    /// Number of cached images across all wikis.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, |map| map.values().map(BTreeMap::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn ensure_loaded(&self) {
        let loaded = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        if loaded {
            return;
        }

        let map = match read_json::<ImageMap>(&self.path).await {
            Ok(Some(map)) => map,
            Ok(None) => ImageMap::new(),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable image cache {}: {}",
                    self.path.display(),
                    e
                );
                ImageMap::new()
            }
        };

        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            log::debug!("Loaded image cache from {}", self.path.display());
            *guard = Some(map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use tempfile::TempDir;

    const WIKI: &str = "https://example.fandom.com";

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let cache = ImageCache::in_dir(tmp.path());
        assert!(cache.get(WIKI, "Carsomyr.png").await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_insert_persists_whole_map() {
        let tmp = TempDir::new().unwrap();
        let cache = ImageCache::in_dir(tmp.path());
        cache.insert(WIKI, "A.png", "https://img/a.png").await.unwrap();
        cache.insert(WIKI, "B.png", "https://img/b.png").await.unwrap();

        let content = std::fs::read_to_string(cache.path()).unwrap();
        let map: ImageMap = serde_json::from_str(&content).unwrap();
        assert_eq!(map[WIKI].len(), 2);
        assert_eq!(map[WIKI]["B.png"], "https://img/b.png");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_keep_every_entry() {
        let tmp = TempDir::new().unwrap();
        let cache = ImageCache::in_dir(tmp.path());

        for round in 0..20 {
            let names: Vec<String> = (0..5).map(|i| format!("R{round}_{i}.png")).collect();
            let results = join_all(
                names
                    .iter()
                    .map(|name| cache.insert(WIKI, name, "https://img/x.png")),
            )
            .await;
            assert!(results.iter().all(|r| r.is_ok()));

            let content = std::fs::read_to_string(cache.path()).unwrap();
            let map: ImageMap = serde_json::from_str(&content).unwrap();
            assert_eq!(map[WIKI].len(), (round + 1) * 5);
        }

        let leftovers = std::fs::read_dir(tmp.path())
            .unwrap()
            .filter(|entry| entry.as_ref().unwrap().file_name() != "images.json")
            .count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_loads_existing_file_lazily() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("images.json");
        std::fs::write(
            &path,
            r#"{ "https://example.fandom.com": { "Carsomyr.png": "https://img/c.png" } }"#,
        )
        .unwrap();

        let cache = ImageCache::new(&path);
        assert_eq!(cache.len(), 0);
        assert_eq!(
            cache.get(WIKI, "Carsomyr.png").await.as_deref(),
            Some("https://img/c.png")
        );
        assert!(cache.get("https://other.wiki", "Carsomyr.png").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_treated_as_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("images.json");
        std::fs::write(&path, "{ not json").unwrap();

        let cache = ImageCache::new(&path);
        assert!(cache.get(WIKI, "A.png").await.is_none());
        cache.insert(WIKI, "A.png", "https://img/a.png").await.unwrap();
        assert_eq!(cache.len(), 1);
    }
}
