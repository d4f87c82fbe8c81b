use tracing::debug;

use crate::config::Lookups;
use crate::decode::DecodedDocument;
use crate::metadata::DocumentMetadata;
use crate::model::{DocumentResult, ExtractionStats};

use super::assemble::RecordAssembler;
use super::locator::locate_tables;
use super::merge::{MergedTable, PageMerger};
use super::types::ExtractOptions;

/// Runs one decoded document through locator, merger, fallback and assembly,
/// and reads its sector allocation from the page text.
///
/// Never fails: pages and rows that yield nothing are absorbed into the stats
/// and a document without records comes back with `success == false`.
pub fn extract_document(
    source: &str,
    document: &DecodedDocument,
    metadata: &DocumentMetadata,
    aum_crore: Option<f64>,
    lookups: &Lookups,
    options: &ExtractOptions,
) -> DocumentResult {
    let mut stats = ExtractionStats {
        pages: document.pages.len(),
        ..ExtractionStats::default()
    };
    let mut merger = PageMerger::new(options.stitch_headerless);
    let mut assembler = RecordAssembler::new(metadata, &lookups.normalizer, options, aum_crore);

    for (page_index, page) in document.pages.iter().enumerate() {
        let located = locate_tables(page_index, page);
        stats.tables_located += located.len();

        let (closed, outcome) = merger.push_page(page_index, located);
        stats.tables_unmapped += outcome.unmapped_tables;
        if outcome.continued {
            stats.continuations += 1;
        }
        for table in closed {
            emit(source, table, &mut stats, &mut assembler);
        }

        if outcome.mapped_tables > 0 {
            stats.table_pages += 1;
            continue;
        }

        stats.fallback_pages += 1;
        let rows = lookups.patterns.extract(&page.text);
        if rows.is_empty() {
            debug!(source, page = page_index + 1, "page yielded no table and no pattern rows");
        }
        stats.fallback_rows += rows.len();
        assembler.push_fallback(rows);
    }

    if let Some(table) = merger.finish() {
        emit(source, table, &mut stats, &mut assembler);
    }

    let sector_allocation = lookups.allocation.read(document, &lookups.normalizer);
    let assembled = assembler.finish();
    stats.sector_heading_rows = assembled.sector_heading_rows;
    stats.isin_lookups = assembled.isin_lookups;
    stats.derived_market_values = assembled.derived_market_values;

    let diagnostic = if !assembled.records.is_empty() {
        None
    } else if stats.pages == 0 {
        Some("document has no pages".to_string())
    } else if stats.table_rows + stats.fallback_rows == 0 {
        Some(format!(
            "no holdings table or fallback pattern matched in {} pages ({} tables located, {} without a security column)",
            stats.pages, stats.tables_located, stats.tables_unmapped
        ))
    } else {
        Some(format!(
            "all {} candidate rows were dropped as non-holdings",
            assembled.dropped_rows
        ))
    };

    DocumentResult {
        source: source.to_string(),
        success: diagnostic.is_none(),
        metadata: Some(metadata.clone()),
        records: assembled.records,
        dropped_rows: assembled.dropped_rows,
        diagnostic,
        sector_allocation,
        stats,
    }
}

fn emit(
    source: &str,
    table: MergedTable,
    stats: &mut ExtractionStats,
    assembler: &mut RecordAssembler<'_>,
) {
    debug!(
        source,
        first_page = table.first_page + 1,
        last_page = table.last_page + 1,
        rows = table.rows.len(),
        "table closed"
    );
    stats.tables_merged += 1;
    stats.table_rows += table.rows.len();
    assembler.push_table(&table);
}
