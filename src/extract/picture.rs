// src/extract/picture.rs

use super::first_field;
use crate::wikitext::Fields;

const IMAGE_KEYS: [&str; 3] = ["image", "picture", "icon"];

/// Image name from the infobox, without any `File:` prefix.
pub fn image_name(fields: &Fields) -> Option<String> {
    let raw = first_field(fields, &IMAGE_KEYS)?;
    let name = raw
        .trim_start_matches("[[")
        .trim_end_matches("]]")
        .split('|')
        .next()
        .unwrap_or("")
        .trim();
    let name = ["File:", "file:", "Image:", "image:"]
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name)
        .trim();

    (!name.is_empty()).then(|| name.to_string())
}
