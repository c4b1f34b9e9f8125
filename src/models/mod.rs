// src/models/mod.rs

//! Domain models for the wiki extraction layer.
//!
//! This module contains the data structures shared across the crate,
//! organized by their primary purpose.

pub mod api;
mod config;
mod item;
mod listing;

// Re-export all public types
pub use config::{BatchConfig, CacheConfig, Config, WikiConfig};
pub use item::{Coordinates, IndexRecord, ItemRecord};
pub use listing::{Article, ArticlesOptions, CategoryMember};
