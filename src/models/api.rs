//! Typed MediaWiki API responses.
//!
//! Responses are validated at the boundary; an unexpected shape becomes
//! `AppError::Shape` instead of a silently missing value.

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Decode a cached JSON body into a typed response.
pub fn decode<T: DeserializeOwned>(context: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| AppError::shape(context, e))
}

/// `action=query&prop=revisions`
#[derive(Debug, Deserialize)]
pub struct PageQueryResponse {
    pub query: PageQuery,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Keyed by opaque page id (`-1` for missing pages)
    pub pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    #[serde(default)]
    pub title: Option<String>,

    /// Present (as `""` or `true`) when the page does not exist
    #[serde(default)]
    pub missing: Option<Value>,

    #[serde(default)]
    pub revisions: Vec<Revision>,
}

impl PageEntry {
    pub fn is_missing(&self) -> bool {
        self.missing.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct Revision {
    /// Legacy JSON format puts the content under `*`
    #[serde(rename = "*", alias = "content", default)]
    pub content: Option<String>,

    #[serde(default)]
    pub slots: Option<RevisionSlots>,
}

impl Revision {
    /// Revision text, whichever format the wiki answered in.
    pub fn into_content(self) -> Option<String> {
        self.content
            .or_else(|| self.slots.and_then(|slots| slots.main.content))
    }
}

#[derive(Debug, Deserialize)]
pub struct RevisionSlots {
    pub main: SlotContent,
}

#[derive(Debug, Deserialize)]
pub struct SlotContent {
    #[serde(rename = "*", alias = "content", default)]
    pub content: Option<String>,
}

/// `action=query&list=categorymembers`
#[derive(Debug, Deserialize)]
pub struct CategoryMembersResponse {
    pub query: CategoryQuery,

    #[serde(rename = "continue", default)]
    pub continuation: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub categorymembers: Vec<CategoryMemberEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryMemberEntry {
    pub title: String,
}

/// `api/v1/Articles/List`
#[derive(Debug, Deserialize)]
pub struct ArticlesListResponse {
    pub items: Vec<ArticleEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleEntry {
    pub id: u64,
    pub title: String,
    pub url: String,
}
