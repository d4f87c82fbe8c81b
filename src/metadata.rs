//! Document-level metadata: date, AMC and fund name.
//!
//! Resolution order is explicit override, then the `AMC_FundName_YYYYMM`
//! filename convention, then cues in the page text.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

const UNKNOWN_AMC: &str = "Unknown";
const UNKNOWN_FUND: &str = "Unknown Fund";
const MIN_FUND_NAME_CHARS: usize = 10;
const AUM_RANGE_CRORE: (f64, f64) = (10.0, 1_000_000.0);

const AS_ON_DATE_FORMATS: &[&str] = &[
    "%d-%b-%Y", "%d-%B-%Y", "%d %b %Y", "%d %B %Y", "%d/%b/%Y", "%d-%b-%y", "%d/%m/%Y",
    "%d-%m-%Y", "%d.%m.%Y",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
    pub date: NaiveDate,
    pub amc: String,
    pub fund_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilenameMetadata {
    pub amc: Option<String>,
    pub fund_name: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct MetadataOverrides {
    pub amc: Option<String>,
    pub fund_name: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct MetadataResolver {
    compact_month: Regex,
    loose_month: Regex,
    fund_name_patterns: Vec<Regex>,
    as_on_date: Regex,
    aum_patterns: Vec<Regex>,
}

impl MetadataResolver {
    pub fn new() -> Result<Self> {
        Ok(Self {
            compact_month: Regex::new(r"^(\d{4})(\d{2})$")
                .context("failed to compile compact month regex")?,
            loose_month: Regex::new(r"(?:^|\D)(\d{4})[-_]?(\d{2})(?:\D|$)")
                .context("failed to compile loose month regex")?,
            fund_name_patterns: vec![
                Regex::new(
                    r"(?i)([\w ]+(?:Large\s*(?:and|&)?\s*Mid\s*Cap|Large\s*Cap|Mid\s*Cap|Small\s*Cap|Multi\s*Cap|Flexi\s*Cap)\s*Fund)",
                )
                .context("failed to compile cap-category fund name regex")?,
                Regex::new(r"(?i)([\w ]+Fund)").context("failed to compile fund name regex")?,
            ],
            as_on_date: Regex::new(
                r"(?i)(?:data\s+as\s+on|as\s+on|as\s+of)[\s:]+(\d{1,2}[-/ .][A-Za-z]+[-/ .]\d{2,4}|\d{1,2}[-/.]\d{1,2}[-/.]\d{4})",
            )
            .context("failed to compile as-on date regex")?,
            aum_patterns: [
                r"(?i)Latest\s+AUM.*?[`₹]\s*([\d,]+\.?\d*)\s*\(?[`₹]?\s*cr",
                r"(?i)AUM[:\s]*[`₹]?\s*([\d,]+\.?\d*)\s*(?:Cr|Crore)",
                r"(?i)Net\s+Assets[:\s]*[`₹]?\s*([\d,]+\.?\d*)\s*(?:Cr|Crore)",
                r"(?i)Fund\s+Size[:\s]*[`₹]?\s*([\d,]+\.?\d*)\s*(?:Cr|Crore)",
                r"(?i)Monthly\s+AAUM.*?[`₹]\s*([\d,]+\.?\d*)\s*\(?[`₹]?\s*cr",
            ]
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("failed to compile AUM regex: {pattern}"))
            })
            .collect::<Result<Vec<Regex>>>()?,
        })
    }

    /// Splits `AMC_FundName_YYYYMM.ext` into its parts. Any part may be
    /// missing; the month may also appear as `YYYY-MM` anywhere in the stem.
    pub fn parse_filename(&self, path: &Path) -> FilenameMetadata {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let tokens = stem
            .split(|character: char| character == '_' || character.is_whitespace())
            .filter(|token| !token.is_empty())
            .collect::<Vec<&str>>();

        let mut metadata = FilenameMetadata::default();
        let mut name_tokens = tokens.as_slice();

        if let Some((last, rest)) = name_tokens.split_last()
            && let Some(captures) = self.compact_month.captures(last)
        {
            metadata.date = month_start(&captures[1], &captures[2]);
            if metadata.date.is_some() {
                name_tokens = rest;
            }
        }

        if metadata.date.is_none()
            && let Some(captures) = self.loose_month.captures(stem)
        {
            metadata.date = month_start(&captures[1], &captures[2]);
        }

        if let Some((first, rest)) = name_tokens.split_first() {
            if !is_month_token(first) {
                metadata.amc = Some(first.to_string());
            }
            let fund_tokens = rest
                .iter()
                .copied()
                .filter(|token| !is_month_token(token))
                .collect::<Vec<&str>>();
            if !fund_tokens.is_empty() {
                metadata.fund_name = Some(fund_tokens.join(" "));
            }
        }

        metadata
    }

    pub fn fund_name_from_text(&self, text: &str) -> Option<String> {
        for pattern in &self.fund_name_patterns {
            for line in text.lines() {
                let Some(captures) = pattern.captures(line) else {
                    continue;
                };
                let candidate = captures[1].split_whitespace().collect::<Vec<&str>>().join(" ");
                if candidate.chars().count() > MIN_FUND_NAME_CHARS
                    && candidate.to_lowercase().contains("fund")
                {
                    return Some(candidate);
                }
            }
        }

        None
    }

    pub fn as_on_date_from_text(&self, text: &str) -> Option<NaiveDate> {
        self.as_on_date
            .captures_iter(text)
            .filter_map(|captures| parse_loose_date(&captures[1]))
            .next()
    }

    /// Fund AUM in crores, when the factsheet states one in a plausible range.
    pub fn aum_from_text(&self, text: &str) -> Option<f64> {
        self.aum_patterns.iter().find_map(|pattern| {
            pattern
                .captures_iter(text)
                .filter_map(|captures| captures[1].replace(',', "").parse::<f64>().ok())
                .find(|aum| (AUM_RANGE_CRORE.0..=AUM_RANGE_CRORE.1).contains(aum))
        })
    }

    pub fn resolve(
        &self,
        path: &Path,
        text: &str,
        overrides: &MetadataOverrides,
    ) -> Result<DocumentMetadata> {
        let from_filename = self.parse_filename(path);

        let date = overrides
            .date
            .or(from_filename.date)
            .or_else(|| self.as_on_date_from_text(text));
        let Some(date) = date else {
            bail!(
                "could not resolve a document date for {} (no YYYYMM in filename, no 'as on' date in text)",
                path.display()
            );
        };

        let amc = overrides
            .amc
            .clone()
            .or(from_filename.amc)
            .unwrap_or_else(|| UNKNOWN_AMC.to_string());
        let fund_name = overrides
            .fund_name
            .clone()
            .or(from_filename.fund_name)
            .or_else(|| self.fund_name_from_text(text))
            .unwrap_or_else(|| UNKNOWN_FUND.to_string());

        Ok(DocumentMetadata {
            date,
            amc,
            fund_name,
        })
    }
}

fn month_start(year: &str, month: &str) -> Option<NaiveDate> {
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn is_month_token(token: &str) -> bool {
    token.len() >= 6
        && token
            .chars()
            .all(|character| character.is_ascii_digit() || character == '-')
}

fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.split_whitespace().collect::<Vec<&str>>().join(" ");
    AS_ON_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
}
