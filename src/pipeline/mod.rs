//! Batch pipelines built on [`WikiClient`](crate::services::WikiClient).
//!
//! - `run_export`: Index records for every member of a category

pub mod export;

pub use export::{ExportOutcome, ExportStats, run_export, write_records};
