// src/extract/title.rs

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::models::Coordinates;

static DISAMBIGUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\([^()]*\)$").expect("valid disambiguation regex"));

/// Half-width of the coordinate range; keeps values strictly inside ±90.
const COORDINATE_SPAN: f64 = 89.5;

/// Remove a trailing `" (…)"` disambiguation suffix.
pub fn format_title(title: &str) -> String {
    DISAMBIGUATION.replace(title, "").into_owned()
}

/// Deterministic pseudo-coordinates for a title.
///
/// Both values lie in `[-89.5, 89.5)`.
pub fn coordinates(title: &str) -> Coordinates {
    let digest = Sha256::digest(title.as_bytes());
    Coordinates {
        lat: unit_to_degrees(&digest[..8]),
        lng: unit_to_degrees(&digest[8..16]),
    }
}

fn unit_to_degrees(bytes: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    // 53 bits fit an f64 mantissa exactly, so the fraction is in [0, 1)
    let fraction = (u64::from_be_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64;
    fraction * 2.0 * COORDINATE_SPAN - COORDINATE_SPAN
}
