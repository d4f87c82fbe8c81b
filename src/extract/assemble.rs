use tracing::debug;

use crate::metadata::DocumentMetadata;
use crate::model::HoldingRecord;
use crate::normalize::{Normalizer, clean_isin, collapse_whitespace, lookup_key, parse_number, parse_percent};

use super::fallback::FallbackRow;
use super::merge::MergedTable;
use super::types::{ExtractOptions, Role};

const DEFAULT_SECTOR: &str = "Other";
const DEFAULT_AMC: &str = "Unknown";
const MIN_SECURITY_CHARS: usize = 3;
const MAX_SECURITY_CHARS: usize = 100;

/// Cell texts that are column labels or asset-class captions, never holdings.
const REJECT_EXACT: &[&str] = &[
    "equity",
    "debt",
    "scrip",
    "security",
    "securities",
    "stock",
    "stocks",
    "company",
    "name",
    "weight",
    "weightage",
    "holdings",
    "portfolio",
    "others",
    "instrument",
];

/// Whole-word phrases marking totals and non-holding balance lines.
const REJECT_PHRASES: &[&str] = &[
    "total",
    "grand total",
    "sub total",
    "subtotal",
    "net receivables",
    "receivables",
    "payables",
    "net current assets",
    "cash",
    "treps",
    "reverse repo",
    "equity & equity related",
    "margin money",
];

/// True when `name` can stand as the security of a holding record.
pub fn is_holding_name(name: &str) -> bool {
    let length = name.chars().count();
    if !(MIN_SECURITY_CHARS..=MAX_SECURITY_CHARS).contains(&length) {
        return false;
    }
    if !name.chars().any(char::is_alphabetic) {
        return false;
    }
    if REJECT_EXACT.contains(&lookup_key(name).as_str()) {
        return false;
    }

    let words = name
        .to_lowercase()
        .chars()
        .map(|character| {
            if character.is_alphanumeric() || character == '&' {
                character
            } else {
                ' '
            }
        })
        .collect::<String>();
    let padded = format!(" {} ", collapse_whitespace(&words));

    !REJECT_PHRASES
        .iter()
        .any(|phrase| padded.contains(&format!(" {phrase} ")))
}

/// Strips footnote markers and collapses whitespace.
pub fn clean_security(raw: &str) -> String {
    collapse_whitespace(raw)
        .trim_matches(|character: char| {
            matches!(character, '*' | '#' | '^' | '@' | '~' | '$') || character.is_whitespace()
        })
        .to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
struct CandidateRow {
    security: String,
    isin: Option<String>,
    sector: Option<String>,
    pct_of_aum: Option<f64>,
    market_value: Option<f64>,
    quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembled {
    pub records: Vec<HoldingRecord>,
    pub dropped_rows: usize,
    pub sector_heading_rows: usize,
    pub isin_lookups: usize,
    pub derived_market_values: usize,
}

/// Turns stitched table rows and fallback matches into holding records.
pub struct RecordAssembler<'a> {
    metadata: &'a DocumentMetadata,
    normalizer: &'a Normalizer,
    options: &'a ExtractOptions,
    aum_crore: Option<f64>,
    amc: String,
    assembled: Assembled,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(
        metadata: &'a DocumentMetadata,
        normalizer: &'a Normalizer,
        options: &'a ExtractOptions,
        aum_crore: Option<f64>,
    ) -> Self {
        let amc = normalizer
            .amc(&metadata.amc)
            .unwrap_or_else(|| DEFAULT_AMC.to_string());

        Self {
            metadata,
            normalizer,
            options,
            aum_crore,
            amc,
            assembled: Assembled::default(),
        }
    }

    pub fn push_table(&mut self, table: &MergedTable) {
        let mut heading: Option<String> = None;

        for row in &table.rows {
            if let Some(sector) = self.sector_heading(row) {
                self.assembled.sector_heading_rows += 1;
                heading = Some(sector);
                continue;
            }

            let cell = |role: Role| {
                table
                    .schema
                    .get(role)
                    .and_then(|index| row.get(index))
                    .map(String::as_str)
                    .unwrap_or_default()
            };

            let sector = cell(Role::Sector);
            let candidate = CandidateRow {
                security: cell(Role::SecurityName).to_string(),
                isin: Some(cell(Role::Isin).to_string()).filter(|isin| !isin.is_empty()),
                sector: Some(sector.to_string()).filter(|sector| !sector.trim().is_empty()),
                pct_of_aum: parse_percent(cell(Role::PctOfAum)),
                market_value: parse_number(cell(Role::MarketValue)),
                quantity: parse_number(cell(Role::Quantity)),
            };
            self.push_candidate(candidate, heading.as_deref());
        }
    }

    pub fn push_fallback(&mut self, rows: Vec<FallbackRow>) {
        for row in rows {
            debug!(pattern = %row.pattern, security = %row.security, "pattern row");
            let candidate = CandidateRow {
                security: row.security,
                isin: row.isin,
                sector: None,
                pct_of_aum: Some(row.pct_of_aum),
                market_value: row.market_value,
                quantity: None,
            };
            self.push_candidate(candidate, None);
        }
    }

    pub fn finish(self) -> Assembled {
        self.assembled
    }

    /// Sector name standing alone in an otherwise empty row.
    fn sector_heading(&self, row: &[String]) -> Option<String> {
        let mut populated = row.iter().filter(|cell| !cell.trim().is_empty());
        let only = populated.next()?;
        if populated.next().is_some() || !self.normalizer.is_known_sector(only) {
            return None;
        }
        self.normalizer.sector(only)
    }

    fn push_candidate(&mut self, candidate: CandidateRow, heading: Option<&str>) {
        let security = clean_security(&candidate.security);
        if !is_holding_name(&security) {
            debug!(security = %candidate.security, "dropped non-holding row");
            self.assembled.dropped_rows += 1;
            return;
        }

        let mut isin = candidate.isin.as_deref().and_then(clean_isin);
        if isin.is_none() && self.options.lookup_missing_isin {
            isin = self.normalizer.lookup_isin(&security);
            if isin.is_some() {
                self.assembled.isin_lookups += 1;
            }
        }

        let sector = candidate
            .sector
            .as_deref()
            .and_then(|raw| self.normalizer.sector(raw))
            .or_else(|| heading.and_then(|heading| self.normalizer.sector(heading)))
            .or_else(|| self.normalizer.guess_sector(&security))
            .or_else(|| self.normalizer.sector(DEFAULT_SECTOR))
            .unwrap_or_else(|| DEFAULT_SECTOR.to_string());

        let mut market_value = candidate.market_value;
        if market_value.is_none()
            && self.options.derive_market_value
            && let (Some(pct), Some(aum)) = (candidate.pct_of_aum, self.aum_crore)
        {
            market_value = Some(round2(pct / 100.0 * aum));
            self.assembled.derived_market_values += 1;
        }

        self.assembled.records.push(HoldingRecord {
            date: self.metadata.date,
            amc: self.amc.clone(),
            fund_name: self.metadata.fund_name.clone(),
            security,
            isin,
            sector,
            pct_of_aum: candidate.pct_of_aum,
            market_value,
            quantity: candidate.quantity,
        });
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
