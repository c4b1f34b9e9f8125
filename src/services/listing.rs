// src/services/listing.rs

//! Category walking through the two listing APIs a wiki may expose.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::models::api::{self, ArticlesListResponse, CategoryMembersResponse};
use crate::models::{Article, ArticlesOptions, CategoryMember};
use crate::services::WikiClient;
use crate::utils::url::{api_php, title_to_url, with_query};

/// Namespaces whose pages are never items.
static RESERVED_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Category|Thread|User|Portal|Template):").expect("valid namespace regex")
});

impl WikiClient {
    /// Pages in `Category:<category>`, reserved namespaces excluded.
    ///
    /// Only the first response page is read (`cmlimit=max`); a continuation
    /// token is logged and otherwise ignored.
    pub async fn category_members(&self, category: &str) -> Result<Vec<CategoryMember>> {
        let cmtitle = format!("Category:{category}");
        let url = api_php(
            self.base_url(),
            &[
                ("action", "query"),
                ("cmlimit", "max"),
                ("cmtitle", cmtitle.as_str()),
                ("format", "json"),
                ("list", "categorymembers"),
            ],
        )?;

        let response: CategoryMembersResponse =
            api::decode("category members", self.read_json_url(&url).await?)?;
        if response.continuation.is_some() {
            log::debug!("Category {category} has more members than one request returns");
        }

        Ok(response
            .query
            .categorymembers
            .into_iter()
            .filter(|entry| !RESERVED_NAMESPACE.is_match(&entry.title))
            .map(|entry| CategoryMember {
                url: format!("{}/{}", self.base_url(), title_to_url(&entry.title)),
                title: entry.title,
            })
            .collect())
    }

    /// Articles of a category from `api/v1/Articles/List`, sorted by title.
    pub async fn articles(&self, category: &str, options: &ArticlesOptions) -> Result<Vec<Article>> {
        let limit = options.limit.to_string();
        let mut params: Vec<(&str, &str)> = vec![("limit", limit.as_str()), ("category", category)];
        for (key, value) in &options.extra {
            match params.iter_mut().find(|(k, _)| *k == key.as_str()) {
                Some(param) => param.1 = value.as_str(),
                None => params.push((key.as_str(), value.as_str())),
            }
        }

        let url = with_query(self.base_url(), "api/v1/Articles/List", &params)?;
        let response: ArticlesListResponse =
            api::decode("articles list", self.read_json_url(&url).await?)?;

        // The first item is the category page itself
        let mut articles: Vec<Article> = response
            .items
            .into_iter()
            .skip(1)
            .map(|item| Article {
                id: item.id,
                title: item.title,
                url: format!("{}{}", self.base_url(), item.url),
            })
            .collect();
        articles.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(articles)
    }
}
