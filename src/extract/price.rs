// src/extract/price.rs

use std::sync::LazyLock;

use regex::Regex;

use super::first_field;
use crate::wikitext::Fields;

/// Infobox keys holding the sale value, most specific first.
const PRICE_KEYS: [&str; 6] = ["value", "price", "cost", "baseValue", "sellValue", "gold"];

/// Values meaning the item cannot be bought.
const NOT_FOR_SALE: [&str; 9] = [
    "n/a",
    "na",
    "none",
    "-",
    "—",
    "?",
    "unknown",
    "unsellable",
    "not for sale",
];

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d(?:[,. ]?\d)*").expect("valid amount regex"));

/// Sale value from the infobox.
pub fn price(fields: &Fields) -> Option<u32> {
    first_field(fields, &PRICE_KEYS).and_then(parse_price)
}

/// Parse a display value such as `"20,000 gp"`.
///
/// Thousands separators inside the first number are ignored; anything after
/// it (sell price, notes) is not.
pub fn parse_price(raw: &str) -> Option<u32> {
    let lower = raw.trim().to_lowercase();
    if NOT_FOR_SALE
        .iter()
        .any(|marker| lower == *marker || lower.starts_with("not for sale"))
    {
        return None;
    }

    let amount = AMOUNT.find(&lower)?;
    let digits: String = amount
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
