use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::normalize::{clean_isin, collapse_whitespace, parse_number};

use super::assemble::{clean_security, is_holding_name};

const ISIN: &str = r"[A-Z][A-Z0-9]{10}[0-9]";
const PCT: &str = r"\d{1,3}(?:\.\d+)?";
const VALUE: &str = r"\d[\d,]*(?:\.\d+)?";
/// A name that ends on a letter, a closing parenthesis, a period or a footnote
/// marker, so a trailing figure is never swallowed into it.
const SECURITY: &str = r"(?P<security>.*?[A-Za-z).*#^@~$])";

/// Words that mark a text line as commentary rather than a holding.
const SKIP_WORDS: &[&str] = &[
    "page", "total", "scheme", "fund", "year", "month", "return", "nav", "ratio", "expense",
    "benchmark",
];

/// One holding read from a line of page text.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackRow {
    pub security: String,
    pub isin: Option<String>,
    pub pct_of_aum: f64,
    pub market_value: Option<f64>,
    pub pattern: String,
}

#[derive(Debug, Clone)]
struct FallbackPattern {
    name: String,
    regex: Regex,
}

/// Ordered line patterns with named groups `security` and `pct` (required),
/// `isin` and `market_value` (optional). The first matching pattern wins.
#[derive(Debug, Clone, Default)]
pub struct FallbackPatterns {
    patterns: Vec<FallbackPattern>,
}

impl FallbackPatterns {
    pub fn builtin() -> Result<Self> {
        let mut patterns = Self::default();
        patterns.push(
            "name_isin_value_pct",
            &format!(
                r"^(?P<security>.+?)\s+(?P<isin>{ISIN})\s+(?P<market_value>{VALUE})\s+(?P<pct>{PCT})\s*%?$"
            ),
        )?;
        patterns.push(
            "name_pct_isin",
            &format!(r"^(?P<security>.+?)\s+(?P<pct>{PCT})\s*%\s+(?P<isin>{ISIN})$"),
        )?;
        patterns.push(
            "name_isin_pct",
            &format!(r"^(?P<security>.+?)\s+(?P<isin>{ISIN})\s+(?P<pct>{PCT})\s*%?$"),
        )?;
        patterns.push(
            "name_value_pct",
            &format!(r"^{SECURITY}\s+(?P<market_value>{VALUE})\s+(?P<pct>{PCT})\s*%$"),
        )?;
        patterns.push(
            "name_pct_sign",
            &format!(r"^{SECURITY}\s+(?P<pct>{PCT})\s*%$"),
        )?;
        patterns.push(
            "company_suffix_decimal",
            r"^(?P<security>[A-Z][A-Za-z0-9&.,()' -]*?(?:Ltd|Limited|Corp|Inc)\.?)\s+(?P<pct>\d{1,3}\.\d+)$",
        )?;
        Ok(patterns)
    }

    /// Appends a pattern after the existing ones.
    pub fn push(&mut self, name: &str, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("failed to compile fallback pattern '{name}'"))?;

        for group in ["security", "pct"] {
            if !regex.capture_names().flatten().any(|existing| existing == group) {
                bail!("fallback pattern '{name}' has no named group '{group}'");
            }
        }

        self.patterns.push(FallbackPattern {
            name: name.to_string(),
            regex,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| pattern.name.as_str())
    }

    /// Holdings found in `text`, one per matching line, in line order.
    pub fn extract(&self, text: &str) -> Vec<FallbackRow> {
        text.lines()
            .map(collapse_whitespace)
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.match_line(&line))
            .collect()
    }

    fn match_line(&self, line: &str) -> Option<FallbackRow> {
        let (pattern, captures) = self
            .patterns
            .iter()
            .find_map(|pattern| pattern.regex.captures(line).map(|captures| (pattern, captures)))?;

        let security = clean_security(captures.name("security")?.as_str());
        if has_skip_word(&security) || !is_holding_name(&security) {
            return None;
        }

        let pct_of_aum = parse_number(captures.name("pct")?.as_str())?;
        if pct_of_aum <= 0.0 || pct_of_aum > 100.0 {
            return None;
        }

        Some(FallbackRow {
            security,
            isin: captures
                .name("isin")
                .and_then(|isin| clean_isin(isin.as_str())),
            pct_of_aum,
            market_value: captures
                .name("market_value")
                .and_then(|value| parse_number(value.as_str())),
            pattern: pattern.name.clone(),
        })
    }
}

pub(super) fn has_skip_word(text: &str) -> bool {
    text
        .to_lowercase()
        .split(|character: char| !character.is_alphanumeric())
        .any(|word| SKIP_WORDS.contains(&word))
}
