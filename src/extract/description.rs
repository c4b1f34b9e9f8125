// src/extract/description.rs

use unicode_segmentation::UnicodeSegmentation;

use crate::utils::normalize_whitespace;
use crate::wikitext::Document;

/// Markers that start the statistics block of in-game descriptions.
const DELIMITERS: [&str; 6] = [
    "STATISTICS:",
    "Statistics:",
    "PARAMETERS:",
    "Parameters:",
    "Equipped abilities:",
    "Combat abilities:",
];

/// Readable description of the page subject.
///
/// Prefers a `Description` section, then the lead, then the first section
/// with any text. Text from the first delimiter marker onward is dropped.
pub fn description(doc: &Document) -> Option<String> {
    let section = doc
        .section("Description")
        .filter(|s| !s.text.is_empty())
        .or_else(|| doc.lead().filter(|s| !s.text.is_empty()))
        .or_else(|| doc.sections.iter().find(|s| !s.text.is_empty()))?;

    let text = normalize_whitespace(cut_at_delimiter(&section.text));
    (!text.is_empty()).then_some(text)
}

/// Keep the first `count` sentences; `0` keeps everything.
pub fn first_sentences(text: &str, count: usize) -> String {
    if count == 0 {
        return text.to_string();
    }
    text.split_sentence_bounds()
        .take(count)
        .collect::<String>()
        .trim()
        .to_string()
}

fn cut_at_delimiter(text: &str) -> &str {
    let end = DELIMITERS
        .iter()
        .filter_map(|marker| text.find(marker))
        .min()
        .unwrap_or(text.len());
    &text[..end]
}
