// src/wikitext/mod.rs

//! Minimal wikitext document model.
//!
//! Only the constructs the field extractors rely on are modelled: section
//! headings, infobox templates, categories, redirects and readable text.
//! Everything else is dropped or flattened to plain text.

mod parser;
mod text;

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

pub use parser::parse;
pub use text::{camel_case, plain_text};

/// Infobox fields keyed by camelCase name, values as display text.
pub type Fields = BTreeMap<String, String>;

/// A parsed wiki page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    /// Sections in document order; the first one is the lead
    pub sections: Vec<Section>,

    /// Category names without the `Category:` prefix
    pub categories: Vec<String>,

    /// Target page when the markup is a redirect
    pub redirect: Option<String>,
}

/// One heading-delimited part of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    /// Heading text, empty for the lead section
    pub title: String,

    /// Heading level (`==` is 1, lead is 0)
    pub depth: usize,

    /// Readable text with templates, tables and markup removed
    pub text: String,

    pub infoboxes: Vec<Infobox>,

    /// Names of the other templates used directly in this section
    pub templates: Vec<String>,
}

/// A key/value template summarizing the page subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Infobox {
    /// Template name, e.g. `Infobox item`
    pub name: String,

    /// Parameters in source order, values as display text
    #[serde(serialize_with = "serialize_pairs")]
    pub fields: Vec<(String, String)>,
}

impl Document {
    /// Parse raw wikitext.
    pub fn parse(markup: &str) -> Self {
        parse(markup)
    }

    /// First infobox of the first section that has any.
    pub fn first_infobox(&self) -> Option<&Infobox> {
        self.sections
            .iter()
            .find(|section| !section.infoboxes.is_empty())
            .and_then(|section| section.infoboxes.first())
    }

    /// Leading section, before any heading.
    pub fn lead(&self) -> Option<&Section> {
        self.sections.first().filter(|section| section.depth == 0)
    }

    /// First section whose heading matches `title`, ignoring case.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.title.eq_ignore_ascii_case(title))
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// All section text joined by blank lines.
    pub fn text(&self) -> String {
        self.sections
            .iter()
            .map(|section| section.text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Infobox {
    /// Raw field lookup, ignoring case and surrounding whitespace.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Flatten into camelCase keys; later duplicates win.
    pub fn to_fields(&self) -> Fields {
        self.fields
            .iter()
            .map(|(key, value)| (camel_case(key), value.clone()))
            .collect()
    }
}

fn serialize_pairs<S: Serializer>(
    pairs: &[(String, String)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(pairs.iter().map(|(k, v)| (k, v)))
}
