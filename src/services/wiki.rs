// src/services/wiki.rs

//! Wiki client: markup retrieval, parsed documents and image resolution.
//!
//! All cache state lives on the client, so clients for different wikis can
//! coexist and tests can run against a fake [`Fetcher`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::cache::{ImageCache, UrlCache};
use crate::error::{AppError, Result};
use crate::models::Config;
use crate::models::api::{self, PageQueryResponse, Revision};
use crate::utils::decode_entities;
use crate::utils::http::{Fetcher, HttpFetcher};
use crate::utils::url::{api_php, special_file_path, title_to_url};
use crate::wikitext::{Document, Fields};

/// Read access to one wiki, with its own caches.
pub struct WikiClient {
    base_url: String,
    fetcher: Box<dyn Fetcher>,
    urls: UrlCache,
    images: ImageCache,
    docs: Mutex<HashMap<String, Arc<Document>>>,
}

impl WikiClient {
    /// Create a client for `base_url` caching under `cache_dir`.
    pub fn new(
        base_url: impl Into<String>,
        cache_dir: &Path,
        fetcher: impl Fetcher + 'static,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetcher: Box::new(fetcher),
            urls: UrlCache::new(cache_dir),
            images: ImageCache::in_dir(cache_dir),
            docs: Mutex::new(HashMap::new()),
        }
    }

    /// Create an HTTP-backed client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.wiki)?;
        Ok(Self::new(&config.wiki.base_url, &config.cache.dir, fetcher))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read JSON at `url`, from memory, then disk, then the network.
    pub async fn read_json_url(&self, url: &str) -> Result<Value> {
        if let Some(value) = self.urls.lookup(url).await? {
            return Ok(value);
        }

        log::debug!("Fetching {url}");
        let value = self.fetcher.get_json(url).await?;
        self.urls.store(url, &value).await?;
        Ok(value)
    }

    /// Raw wikitext of a page.
    pub async fn markup(&self, page: &str) -> Result<String> {
        let url = api_php(
            &self.base_url,
            &[
                ("action", "query"),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("format", "json"),
                ("titles", page),
            ],
        )?;

        let response: PageQueryResponse = api::decode("page query", self.read_json_url(&url).await?)?;
        let entry = response
            .query
            .pages
            .into_values()
            .next()
            .ok_or_else(|| AppError::shape("page query", format!("no page entry for {page}")))?;
        if entry.is_missing() {
            return Err(AppError::PageNotFound(page.to_string()));
        }

        entry
            .revisions
            .into_iter()
            .next()
            .and_then(Revision::into_content)
            .ok_or_else(|| AppError::shape("page query", format!("no revision content for {page}")))
    }

    /// Parsed document, memoized per page for the client lifetime.
    pub async fn doc(&self, page: &str) -> Result<Arc<Document>> {
        if let Some(doc) = self.cached_doc(page) {
            return Ok(doc);
        }

        let markup = self.markup(page).await?;
        let doc = Arc::new(Document::parse(&markup));
        self.docs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page.to_string(), Arc::clone(&doc));
        Ok(doc)
    }

    /// Plain-data form of the parsed document.
    pub async fn json(&self, page: &str) -> Result<Value> {
        let doc = self.doc(page).await?;
        Ok(serde_json::to_value(&*doc)?)
    }

    /// First infobox of the page with camelCase keys, if it has one.
    pub async fn infobox(&self, page: &str) -> Result<Option<Fields>> {
        let doc = self.doc(page).await?;
        Ok(doc.first_infobox().map(|infobox| infobox.to_fields()))
    }

    /// Whether the page carries a `{{stub}}` marker.
    pub async fn is_stub(&self, page: &str) -> Result<bool> {
        let markup = self.markup(page).await?;
        Ok(markup.to_lowercase().contains("{{stub}}"))
    }

    /// Whether the page is a redirect.
    pub async fn is_redirect(&self, page: &str) -> Result<bool> {
        let markup = self.markup(page).await?;
        Ok(markup.to_uppercase().contains("#REDIRECT"))
    }

    /// Absolute URL of an uploaded image.
    ///
    /// Failed lookups are not errors for callers: a missing picture should
    /// never stop an item from being indexed.
    pub async fn image_url(&self, image_name: &str) -> Option<String> {
        match self.resolve_image(image_name).await {
            Ok(url) => Some(url),
            Err(e) => {
                log::debug!("No image for {image_name}: {e}");
                None
            }
        }
    }

    /// Resolve an image through `Special:FilePath`, using the image cache.
    pub async fn resolve_image(&self, image_name: &str) -> Result<String> {
        let name = title_to_url(&decode_entities(image_name));
        if let Some(url) = self.images.get(&self.base_url, &name).await {
            return Ok(url);
        }

        let special = special_file_path(&self.base_url, &name);
        let url = self.fetcher.resolve_redirect(&special).await.map_err(|e| {
            log::debug!("Special:FilePath lookup failed for {name}: {e}");
            AppError::ImageNotFound(name.clone())
        })?;

        if let Err(e) = self.images.insert(&self.base_url, &name, &url).await {
            log::warn!("Failed to persist image cache: {e}");
        }
        Ok(url)
    }

    fn cached_doc(&self, page: &str) -> Option<Arc<Document>> {
        self.docs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(page)
            .cloned()
    }
}
