//! Field extractors.
//!
//! Each extractor is a pure function over a parsed [`Document`], its
//! infobox [`Fields`] or a title, and returns `None` when the page gives no
//! usable answer. Defaulting (0, [`UNKNOWN_TYPE`], `false`, no picture) is
//! left to the caller.
//!
//! [`Document`]: crate::wikitext::Document
//! [`Fields`]: crate::wikitext::Fields

mod description;
mod item_type;
mod magic;
mod picture;
mod price;
mod title;

pub use description::{description, first_sentences};
pub use item_type::{item_type, normalize_type};
pub use magic::is_magical;
pub use picture::image_name;
pub use price::{parse_price, price};
pub use title::{coordinates, format_title};

/// Type reported for items whose category cannot be determined.
pub const UNKNOWN_TYPE: &str = "GARBAGE";

/// First non-empty value among `keys`.
fn first_field<'a>(fields: &'a crate::wikitext::Fields, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}
