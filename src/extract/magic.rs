// src/extract/magic.rs

use super::first_field;
use crate::wikitext::{Document, Fields};

const FLAG_KEYS: [&str; 3] = ["magical", "isMagical", "magic"];

/// Whether the item is magical.
///
/// An explicit infobox flag wins, then a non-zero enchantment, then a
/// magical category. `None` means the page says nothing either way.
pub fn is_magical(fields: Option<&Fields>, doc: &Document) -> Option<bool> {
    if let Some(fields) = fields {
        if let Some(flag) = first_field(fields, &FLAG_KEYS).and_then(parse_flag) {
            return Some(flag);
        }
        if first_field(fields, &["enchantment"]).is_some_and(is_enchanted) {
            return Some(true);
        }
    }

    doc.categories
        .iter()
        .any(|category| is_magic_category(category))
        .then_some(true)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "✓" => Some(true),
        "no" | "n" | "false" | "0" | "none" => Some(false),
        _ => None,
    }
}

/// `+1`, `+5`, `2` are enchanted; `0`, `none` are not.
fn is_enchanted(value: &str) -> bool {
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u32>().is_ok_and(|n| n > 0)
}

fn is_magic_category(category: &str) -> bool {
    let lower = category.to_lowercase();
    lower.contains("magic") && !lower.contains("non-magic") && !lower.contains("nonmagic")
}
