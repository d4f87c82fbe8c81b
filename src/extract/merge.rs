use tracing::debug;

use super::columns::{ColumnSchema, is_header_like, map_columns};
use super::types::{LocatedTable, TableConfidence};

/// A table after cross-page stitching.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    pub schema: ColumnSchema,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub first_page: usize,
    pub last_page: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOutcome {
    pub mapped_tables: usize,
    pub unmapped_tables: usize,
    pub continued: bool,
}

/// Stitches tables that run across page breaks.
///
/// At most one table is open at a time. Pages must be pushed in order.
#[derive(Debug, Default)]
pub struct PageMerger {
    open: Option<MergedTable>,
    stitch_headerless: bool,
}

impl PageMerger {
    pub fn new(stitch_headerless: bool) -> Self {
        Self {
            open: None,
            stitch_headerless,
        }
    }

    /// Consumes one page's tables and returns the tables this page closed.
    ///
    /// A page with no mappable table closes the open table; the caller then
    /// runs the text fallback for it.
    pub fn push_page(
        &mut self,
        page_index: usize,
        tables: Vec<LocatedTable>,
    ) -> (Vec<MergedTable>, PageOutcome) {
        let mut closed = Vec::new();
        let mut outcome = PageOutcome::default();

        for located in tables {
            let is_first_mapped = outcome.mapped_tables == 0;
            let table = located.table;

            match located.confidence {
                TableConfidence::WithHeader => {
                    let Some(schema) = map_columns(&table.header) else {
                        debug!(
                            page = page_index + 1,
                            header = ?table.header,
                            "table header has no security column"
                        );
                        outcome.unmapped_tables += 1;
                        continue;
                    };
                    outcome.mapped_tables += 1;

                    if is_first_mapped && self.continues_with(page_index, &schema, &table.rows) {
                        self.append(page_index, table.rows);
                        outcome.continued = true;
                        continue;
                    }

                    closed.extend(self.open.take());
                    self.open = Some(MergedTable {
                        schema,
                        header: table.header,
                        rows: table.rows,
                        first_page: page_index,
                        last_page: page_index,
                    });
                }
                TableConfidence::Headerless => {
                    if self.stitch_headerless
                        && is_first_mapped
                        && self.adopts_headerless(page_index, table.width(), &table.rows)
                    {
                        outcome.mapped_tables += 1;
                        self.append(page_index, table.rows);
                        outcome.continued = true;
                    } else {
                        outcome.unmapped_tables += 1;
                    }
                }
            }
        }

        if outcome.mapped_tables == 0 {
            closed.extend(self.open.take());
        }

        (closed, outcome)
    }

    pub fn finish(&mut self) -> Option<MergedTable> {
        self.open.take()
    }

    fn follows_open(&self, page_index: usize) -> bool {
        self.open
            .as_ref()
            .map(|open| open.last_page + 1 == page_index)
            .unwrap_or(false)
    }

    fn continues_with(&self, page_index: usize, schema: &ColumnSchema, rows: &[Vec<String>]) -> bool {
        let Some(open) = self.open.as_ref() else {
            return false;
        };

        self.follows_open(page_index)
            && open.schema.is_compatible(schema)
            && !rows.first().map(|row| is_header_like(row)).unwrap_or(false)
    }

    fn adopts_headerless(&self, page_index: usize, width: usize, rows: &[Vec<String>]) -> bool {
        let Some(open) = self.open.as_ref() else {
            return false;
        };

        self.follows_open(page_index)
            && width == open.header.len()
            && !rows.first().map(|row| is_header_like(row)).unwrap_or(false)
    }

    fn append(&mut self, page_index: usize, rows: Vec<Vec<String>>) {
        if let Some(open) = self.open.as_mut() {
            open.rows.extend(rows);
            open.last_page = page_index;
        }
    }
}
