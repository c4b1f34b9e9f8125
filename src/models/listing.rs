//! Category listing entries.

use serde::{Deserialize, Serialize};

/// A page that belongs to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMember {
    pub title: String,
    pub url: String,
}

/// An article returned by the `Articles/List` API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub url: String,
}

/// Query options for the `Articles/List` API.
#[derive(Debug, Clone)]
pub struct ArticlesOptions {
    /// Maximum number of items to fetch
    pub limit: u32,

    /// Additional query parameters passed through verbatim
    pub extra: Vec<(String, String)>,
}

impl Default for ArticlesOptions {
    fn default() -> Self {
        Self {
            limit: 10_000,
            extra: Vec::new(),
        }
    }
}
