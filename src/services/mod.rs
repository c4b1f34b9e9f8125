//! Service layer for wiki access.
//!
//! - Page markup, parsed documents and images (`WikiClient`)
//! - Category listings
//! - Item record assembly

#[cfg(test)]
pub(crate) mod fixtures;
mod items;
mod listing;
mod wiki;

pub use wiki::WikiClient;
