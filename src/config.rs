use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::extract::{FallbackPatterns, SectorAllocationReader};
use crate::normalize::Normalizer;

/// Read-only lookup data shared by every document in a run.
#[derive(Debug, Clone)]
pub struct Lookups {
    pub normalizer: Normalizer,
    pub patterns: FallbackPatterns,
    pub allocation: SectorAllocationReader,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LookupsFile {
    sector_aliases: Vec<(String, String)>,
    amc_aliases: Vec<(String, String)>,
    sector_keywords: Vec<SectorKeywords>,
    fallback_patterns: Vec<PatternEntry>,
}

#[derive(Debug, Deserialize)]
struct SectorKeywords {
    sector: String,
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PatternEntry {
    name: String,
    pattern: String,
}

impl Lookups {
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::builtin(),
            patterns: FallbackPatterns::builtin()?,
            allocation: SectorAllocationReader::new()?,
        })
    }

    /// Built-ins, extended by an optional lookups file and ISIN master CSV.
    pub fn load(lookups_path: Option<&Path>, isin_csv: Option<&Path>) -> Result<Self> {
        let mut lookups = Self::builtin()?;

        if let Some(path) = lookups_path {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read lookups file {}", path.display()))?;
            let file: LookupsFile = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse lookups file {}", path.display()))?;
            lookups
                .apply(file)
                .with_context(|| format!("invalid lookups file {}", path.display()))?;
        }

        if let Some(path) = isin_csv {
            lookups.normalizer.isins_mut().load_csv(path)?;
        }

        let (sectors, amcs, isins) = lookups.normalizer.table_sizes();
        info!(
            sectors,
            amcs,
            isins,
            patterns = lookups.patterns.len(),
            "lookups ready"
        );
        debug!(patterns = ?lookups.patterns.names().collect::<Vec<&str>>(), "fallback patterns");

        Ok(lookups)
    }

    fn apply(&mut self, file: LookupsFile) -> Result<()> {
        self.normalizer.sectors_mut().extend(file.sector_aliases);
        self.normalizer.amcs_mut().extend(file.amc_aliases);
        for entry in &file.sector_keywords {
            self.normalizer
                .add_sector_keywords(&entry.sector, &entry.keywords);
        }
        for entry in &file.fallback_patterns {
            self.patterns.push(&entry.name, &entry.pattern)?;
        }
        Ok(())
    }
}
