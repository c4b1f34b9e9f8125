// src/services/items.rs

//! Item assembly: extractors composed over one page, defaults applied here.

use crate::error::Result;
use crate::extract::{self, UNKNOWN_TYPE};
use crate::models::ItemRecord;
use crate::services::WikiClient;
use crate::utils::url::{title_to_url, url_to_title};
use crate::wikitext::Fields;

impl WikiClient {
    /// Sale value from the infobox, 0 when absent or not for sale.
    pub async fn price(&self, page: &str) -> Result<u32> {
        let fields = self.infobox(page).await?;
        Ok(fields.as_ref().and_then(extract::price).unwrap_or(0))
    }

    /// Description text, empty when the page has none.
    pub async fn description(&self, page: &str) -> Result<String> {
        let doc = self.doc(page).await?;
        Ok(extract::description(&doc).unwrap_or_default())
    }

    /// Canonical item category, [`UNKNOWN_TYPE`] when it cannot be mapped.
    pub async fn item_type(&self, page: &str) -> Result<String> {
        let fields = self.infobox(page).await?;
        Ok(fields
            .as_ref()
            .and_then(extract::item_type)
            .unwrap_or(UNKNOWN_TYPE)
            .to_string())
    }

    pub async fn is_magical(&self, page: &str) -> Result<bool> {
        let doc = self.doc(page).await?;
        let fields = self.infobox(page).await?;
        Ok(extract::is_magical(fields.as_ref(), &doc).unwrap_or(false))
    }

    /// Resolved picture URL, if the infobox names an image that exists.
    pub async fn picture(&self, page: &str) -> Result<Option<String>> {
        let fields = self.infobox(page).await?;
        Ok(self.picture_from(fields.as_ref()).await)
    }

    /// Full record for one item page.
    pub async fn item(&self, page: &str) -> Result<ItemRecord> {
        let doc = self.doc(page).await?;
        let fields = doc.first_infobox().map(|infobox| infobox.to_fields());
        let full_title = url_to_title(page);
        let title = extract::format_title(&full_title);

        let record = ItemRecord {
            slug: title_to_url(&full_title),
            description: extract::description(&doc).unwrap_or_default(),
            price: fields.as_ref().and_then(extract::price).unwrap_or(0),
            item_type: fields
                .as_ref()
                .and_then(extract::item_type)
                .unwrap_or(UNKNOWN_TYPE)
                .to_string(),
            is_magical: extract::is_magical(fields.as_ref(), &doc).unwrap_or(false),
            picture: self.picture_from(fields.as_ref()).await,
            coordinates: extract::coordinates(&title),
            title,
        };
        log::debug!("Assembled item {} ({})", record.title, record.item_type);
        Ok(record)
    }

    async fn picture_from(&self, fields: Option<&Fields>) -> Option<String> {
        let name = fields.and_then(extract::image_name)?;
        self.image_url(&name).await
    }
}
