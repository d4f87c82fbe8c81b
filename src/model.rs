use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extract::ExtractOptions;
use crate::metadata::DocumentMetadata;

/// One security position of one fund on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub date: NaiveDate,
    pub amc: String,
    pub fund_name: String,
    pub security: String,
    pub isin: Option<String>,
    pub sector: String,
    pub pct_of_aum: Option<f64>,
    pub market_value: Option<f64>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub pages: usize,
    pub table_pages: usize,
    pub fallback_pages: usize,
    pub tables_located: usize,
    pub tables_unmapped: usize,
    pub tables_merged: usize,
    pub continuations: usize,
    pub table_rows: usize,
    pub fallback_rows: usize,
    pub sector_heading_rows: usize,
    pub isin_lookups: usize,
    pub derived_market_values: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    pub source: String,
    pub success: bool,
    pub metadata: Option<DocumentMetadata>,
    pub records: Vec<HoldingRecord>,
    pub dropped_rows: usize,
    pub diagnostic: Option<String>,
    /// Canonical sector -> % of AUM as printed in the allocation section.
    pub sector_allocation: BTreeMap<String, f64>,
    pub stats: ExtractionStats,
}

impl DocumentResult {
    /// A document that failed before extraction (decode or metadata).
    pub fn failed(source: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            success: false,
            metadata: None,
            records: Vec::new(),
            dropped_rows: 0,
            diagnostic: Some(diagnostic.into()),
            sector_allocation: BTreeMap::new(),
            stats: ExtractionStats::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub documents: Vec<DocumentResult>,
    pub records: Vec<HoldingRecord>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.documents
            .iter()
            .filter(|document| document.success)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.documents.len() - self.succeeded()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    pub filename: String,
    pub amc: Option<String>,
    pub fund_name: Option<String>,
    pub month: Option<NaiveDate>,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub document_count: usize,
    pub documents: Vec<SourceEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractCounts {
    pub document_count: usize,
    pub succeeded_count: usize,
    pub failed_count: usize,
    pub record_count: usize,
    pub dropped_row_count: usize,
    pub page_count: usize,
    pub fallback_page_count: usize,
    pub continuation_count: usize,
}

impl ExtractCounts {
    pub fn from_batch(batch: &BatchResult) -> Self {
        Self {
            document_count: batch.documents.len(),
            succeeded_count: batch.succeeded(),
            failed_count: batch.failed(),
            record_count: batch.records.len(),
            dropped_row_count: batch
                .documents
                .iter()
                .map(|document| document.dropped_rows)
                .sum(),
            page_count: batch
                .documents
                .iter()
                .map(|document| document.stats.pages)
                .sum(),
            fallback_page_count: batch
                .documents
                .iter()
                .map(|document| document.stats.fallback_pages)
                .sum(),
            continuation_count: batch
                .documents
                .iter()
                .map(|document| document.stats.continuations)
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractPaths {
    pub output_path: String,
    pub lookups_path: Option<String>,
    pub isin_csv: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub completed_at: String,
    pub command: String,
    pub decoder: String,
    pub options: ExtractOptions,
    pub paths: ExtractPaths,
    pub counts: ExtractCounts,
    pub source_hashes: Vec<SourceEntry>,
    pub warnings: Vec<String>,
    pub documents: Vec<DocumentResult>,
    pub records: Vec<HoldingRecord>,
}
