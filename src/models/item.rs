//! Item record produced for the search index.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Pseudo-geographic placement derived from an item title.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One game item, as extracted from its wiki page.
///
/// Records are recomputed on demand and never mutated after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Display title, disambiguation suffix removed
    pub title: String,

    /// Page identifier in URL form
    pub slug: String,

    pub description: String,

    /// Sale value, 0 when unknown or not purchasable
    pub price: u32,

    /// Item category, `"GARBAGE"` when unknown
    #[serde(rename = "type")]
    pub item_type: String,

    pub is_magical: bool,

    /// Absolute image URL
    pub picture: Option<String>,

    pub coordinates: Coordinates,
}

impl ItemRecord {
    /// Number of words in the description.
    pub fn word_count(&self) -> usize {
        self.description.unicode_words().count()
    }
}

/// Item record as uploaded to the search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRecord {
    #[serde(flatten)]
    pub item: ItemRecord,

    /// Used for descending custom ranking
    pub word_count: usize,
}

impl From<ItemRecord> for IndexRecord {
    fn from(item: ItemRecord) -> Self {
        let word_count = item.word_count();
        Self { item, word_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> ItemRecord {
        ItemRecord {
            title: "Carsomyr".to_string(),
            slug: "Carsomyr".to_string(),
            description: "Carsomyr is a weapon of legend, perhaps one of the most powerful.".to_string(),
            price: 20000,
            item_type: "Two-Handed Sword".to_string(),
            is_magical: true,
            picture: None,
            coordinates: Coordinates { lat: 1.5, lng: -2.5 },
        }
    }

    #[test]
    fn test_word_count() {
        assert_eq!(sample_item().word_count(), 12);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(IndexRecord::from(sample_item())).unwrap();

        assert_eq!(value["type"], "Two-Handed Sword");
        assert_eq!(value["isMagical"], true);
        assert_eq!(value["wordCount"], 12);
        assert!(value["picture"].is_null());
        assert_eq!(value["coordinates"]["lat"], 1.5);
    }
}
