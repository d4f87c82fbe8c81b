use serde::Serialize;

/// Semantic role of a physical table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SecurityName,
    Isin,
    Sector,
    PctOfAum,
    MarketValue,
    Quantity,
}

/// A table as found on one page: trimmed header cells and data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub page_index: usize,
}

impl RawTable {
    /// Widest row (or header) in cells.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableConfidence {
    WithHeader,
    Headerless,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocatedTable {
    pub table: RawTable,
    pub confidence: TableConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractOptions {
    /// Let a headerless table continue the table open from the previous page.
    pub stitch_headerless: bool,
    /// Fill a missing ISIN from the ISIN directory.
    pub lookup_missing_isin: bool,
    /// Derive a missing market value from `pct_of_aum` and the fund AUM.
    pub derive_market_value: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            stitch_headerless: false,
            lookup_missing_isin: true,
            derive_market_value: false,
        }
    }
}
