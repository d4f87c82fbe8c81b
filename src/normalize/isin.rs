use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use super::builtin::ISIN_DIRECTORY;
use super::numeric::clean_isin;

const CORPORATE_SUFFIXES: &[&str] = &[
    " limited",
    " ltd.",
    " ltd",
    " pvt",
    " private",
    " public",
    " inc",
    " corporation",
    " corp",
    " (india)",
    " india",
    " & co",
    " co.",
];

const FUZZY_THRESHOLD: f64 = 0.85;
const MIN_CONTAINMENT_CHARS: usize = 4;

/// Company name -> ISIN lookup used to fill identifiers a factsheet omits.
#[derive(Debug, Clone, Default)]
pub struct IsinDirectory {
    entries: BTreeMap<String, String>,
}

impl IsinDirectory {
    pub fn builtin() -> Self {
        let mut directory = Self::default();
        for (name, isin) in ISIN_DIRECTORY {
            directory.insert(name, isin);
        }
        directory
    }

    pub fn insert(&mut self, name: &str, isin: &str) -> bool {
        let key = clean_company_name(name);
        let Some(isin) = clean_isin(isin) else {
            return false;
        };
        if key.is_empty() {
            return false;
        }
        self.entries.insert(key, isin);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Loads a master list whose header carries a name column
    /// ("security"/"company"/"name") and an "isin" column. CSV entries
    /// override built-in ones.
    pub fn load_csv(&mut self, path: &Path) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("failed to open ISIN master {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("failed to read ISIN master header {}", path.display()))?
            .clone();

        let mut name_column = None;
        let mut isin_column = None;
        for (index, header) in headers.iter().enumerate() {
            let lower = header.to_lowercase();
            if isin_column.is_none() && lower.contains("isin") {
                isin_column = Some(index);
            } else if name_column.is_none()
                && (lower.contains("security") || lower.contains("company") || lower.contains("name"))
            {
                name_column = Some(index);
            }
        }

        let (Some(name_column), Some(isin_column)) = (name_column, isin_column) else {
            bail!(
                "ISIN master {} has no recognizable name/ISIN columns",
                path.display()
            );
        };

        let mut loaded = 0usize;
        for record in reader.records() {
            let record = record
                .with_context(|| format!("failed to read ISIN master row in {}", path.display()))?;
            let (Some(name), Some(isin)) = (record.get(name_column), record.get(isin_column)) else {
                continue;
            };
            if self.insert(name, isin) {
                loaded += 1;
            }
        }

        info!(path = %path.display(), loaded, "loaded ISIN master");
        Ok(loaded)
    }

    pub fn lookup(&self, company_name: &str) -> Option<&str> {
        let key = clean_company_name(company_name);
        if key.is_empty() {
            return None;
        }

        if let Some(isin) = self.entries.get(&key) {
            return Some(isin.as_str());
        }

        if key.len() >= MIN_CONTAINMENT_CHARS {
            let padded_key = format!(" {key} ");
            let contained = self
                .entries
                .iter()
                .filter(|(name, _)| name.len() >= MIN_CONTAINMENT_CHARS)
                .filter(|(name, _)| {
                    padded_key.contains(&format!(" {name} "))
                        || format!(" {name} ").contains(&padded_key)
                })
                .max_by_key(|(name, _)| name.len());
            if let Some((_, isin)) = contained {
                return Some(isin.as_str());
            }
        }

        self.entries
            .iter()
            .map(|(name, isin)| (strsim::normalized_levenshtein(&key, name), isin))
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .max_by(|left, right| left.0.total_cmp(&right.0))
            .map(|(_, isin)| isin.as_str())
    }
}

/// Lower-cased company name with corporate suffixes and punctuation removed.
pub fn clean_company_name(name: &str) -> String {
    let mut cleaned = name.trim().to_lowercase();

    for suffix in CORPORATE_SUFFIXES {
        if let Some(stripped) = cleaned.strip_suffix(suffix) {
            cleaned = stripped.trim_end().to_string();
        }
    }

    cleaned
        .chars()
        .map(|character| {
            if character.is_alphanumeric() || character.is_whitespace() || character == '&' {
                character
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
