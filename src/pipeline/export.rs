// src/pipeline/export.rs

//! Category export: every member page of a category as an index record.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::error::Result;
use crate::extract::first_sentences;
use crate::models::{BatchConfig, IndexRecord};
use crate::services::WikiClient;

/// Summary of one export run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub page_total: usize,
    pub exported: usize,
    pub failures: usize,
}

#[derive(Debug)]
pub struct ExportOutcome {
    pub records: Vec<IndexRecord>,
    pub stats: ExportStats,
}

/// Build index records for every member of `category`.
///
/// Pages are processed with bounded concurrency and output keeps category
/// order. A page that fails is logged and skipped.
pub async fn run_export(
    client: &WikiClient,
    batch: &BatchConfig,
    category: &str,
) -> Result<ExportOutcome> {
    let start_time = Utc::now();
    let members = client.category_members(category).await?;
    log::info!("Exporting {} pages from Category:{}", members.len(), category);

    let concurrency = batch.max_concurrent.max(1);
    let delay = Duration::from_millis(batch.request_delay_ms);
    let page_total = members.len();

    let mut records = Vec::with_capacity(page_total);
    let mut failures = 0;
    let mut item_stream = stream::iter(&members)
        .map(|member| async move { (member, client.item(&member.title).await) })
        .buffered(concurrency);

    while let Some((member, result)) = item_stream.next().await {
        match result {
            Ok(mut item) => {
                item.description = first_sentences(&item.description, batch.description_sentences);
                records.push(IndexRecord::from(item));
            }
            Err(e) => {
                failures += 1;
                log::warn!("Skipping {} ({}): {}", member.title, member.url, e);
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    let stats = ExportStats {
        start_time,
        end_time: Utc::now(),
        page_total,
        exported: records.len(),
        failures,
    };
    log::info!(
        "Exported {}/{} pages ({} failed)",
        stats.exported,
        stats.page_total,
        stats.failures
    );

    Ok(ExportOutcome { records, stats })
}

/// Write records as a pretty-printed JSON array.
pub async fn write_records(path: &Path, records: &[IndexRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(records)?;
    tokio::fs::write(path, json).await?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
