// src/lib.rs

//! itemwiki: game item records extracted from MediaWiki-style wikis

pub mod cache;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
pub mod wikitext;
