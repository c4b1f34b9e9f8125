//! Utility functions and helpers.

pub mod http;
pub mod url;

use scraper::Html;

/// Decode HTML entities (`&amp;`, `&#39;`, ...) and drop inline tags.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') && !text.contains('<') {
        return text.to_string();
    }
    Html::parse_fragment(text)
        .root_element()
        .text()
        .collect::<String>()
}

/// Collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
