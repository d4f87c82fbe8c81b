use std::collections::BTreeMap;

use anyhow::{Context, Result};
use regex::Regex;

use crate::decode::DecodedDocument;
use crate::normalize::{Normalizer, collapse_whitespace, parse_number};

use super::fallback::has_skip_word;

const MIN_LABEL_CHARS: usize = 4;

/// Label words that mark a company line rather than a sector line.
const COMPANY_WORDS: &[&str] = &["ltd", "limited", "corp", "corporation", "inc", "co"];

/// Reads "Sector 15.2%" pairs from page text into a sector -> weight map.
#[derive(Debug, Clone)]
pub struct SectorAllocationReader {
    pair: Regex,
}

impl SectorAllocationReader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pair: Regex::new(r"\b(?P<label>[A-Za-z][A-Za-z &\-]*?)\s+(?P<pct>\d{1,3}(?:\.\d+)?)\s*%")
                .context("failed to compile sector allocation regex")?,
        })
    }

    /// Weight per canonical sector over every page, first value kept.
    ///
    /// Only labels the sector table recognises are kept, so holding lines
    /// that share the `name pct%` shape do not leak in.
    pub fn read(&self, document: &DecodedDocument, normalizer: &Normalizer) -> BTreeMap<String, f64> {
        let mut allocation = BTreeMap::new();

        for line in document.pages.iter().flat_map(|page| page.text.lines()) {
            let line = collapse_whitespace(line);
            for captures in self.pair.captures_iter(&line) {
                let (Some(label), Some(pct)) = (captures.name("label"), captures.name("pct")) else {
                    continue;
                };
                let label = label.as_str().trim();
                if label.chars().count() < MIN_LABEL_CHARS
                    || has_skip_word(label)
                    || has_company_word(label)
                {
                    continue;
                }

                let Some(pct) = parse_number(pct.as_str()).filter(|pct| *pct > 0.0 && *pct <= 100.0)
                else {
                    continue;
                };
                if let Some(sector) = normalizer.known_sector(label) {
                    allocation.entry(sector).or_insert(pct);
                }
            }
        }

        allocation
    }
}

fn has_company_word(label: &str) -> bool {
    label
        .to_lowercase()
        .split(|character: char| !character.is_alphanumeric())
        .any(|word| COMPANY_WORDS.contains(&word))
}
