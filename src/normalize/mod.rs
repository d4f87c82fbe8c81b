//! Canonicalization of taxonomy fields and numeric cells.
//!
//! The [`Normalizer`] is built once per process from the built-in tables plus
//! any lookups file, then shared read-only by every document run.

mod builtin;
mod isin;
mod numeric;
mod table;

pub use isin::{IsinDirectory, clean_company_name};
pub use numeric::{clean_isin, parse_number, parse_percent};
pub use table::{NormalizationTable, collapse_whitespace, lookup_key};

use builtin::{AMC_ALIASES, SECTOR_ALIASES, SECTOR_KEYWORDS};

#[derive(Debug, Clone)]
pub struct Normalizer {
    sectors: NormalizationTable,
    amcs: NormalizationTable,
    sector_keywords: Vec<(String, Vec<String>)>,
    isins: IsinDirectory,
}

impl Normalizer {
    pub fn builtin() -> Self {
        Self {
            sectors: NormalizationTable::new(SECTOR_ALIASES.iter().copied()),
            amcs: NormalizationTable::new(AMC_ALIASES.iter().copied()),
            sector_keywords: SECTOR_KEYWORDS
                .iter()
                .map(|(sector, keywords)| {
                    (
                        sector.to_string(),
                        keywords.iter().map(|keyword| keyword.to_string()).collect(),
                    )
                })
                .collect(),
            isins: IsinDirectory::builtin(),
        }
    }

    pub fn sectors_mut(&mut self) -> &mut NormalizationTable {
        &mut self.sectors
    }

    pub fn amcs_mut(&mut self) -> &mut NormalizationTable {
        &mut self.amcs
    }

    pub fn isins_mut(&mut self) -> &mut IsinDirectory {
        &mut self.isins
    }

    pub fn add_sector_keywords(&mut self, sector: &str, keywords: &[String]) {
        let keywords = keywords
            .iter()
            .map(|keyword| collapse_whitespace(keyword).to_lowercase())
            .filter(|keyword| !keyword.is_empty());

        match self
            .sector_keywords
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(sector))
        {
            Some((_, existing)) => existing.extend(keywords),
            None => self
                .sector_keywords
                .push((sector.to_string(), keywords.collect())),
        }
    }

    pub fn table_sizes(&self) -> (usize, usize, usize) {
        (self.sectors.len(), self.amcs.len(), self.isins.len())
    }

    pub fn sector(&self, raw: &str) -> Option<String> {
        self.sectors.canonicalize(raw)
    }

    pub fn amc(&self, raw: &str) -> Option<String> {
        self.amcs.canonicalize(raw)
    }

    /// Canonical sector for `raw` only when the sector table recognises it.
    pub fn known_sector(&self, raw: &str) -> Option<String> {
        self.sectors.resolve(raw).map(str::to_string)
    }

    /// True when `raw` is a sector name the table knows verbatim.
    pub fn is_known_sector(&self, raw: &str) -> bool {
        self.sectors.get_exact(raw).is_some()
    }

    /// Sector inferred from well-known constituents of the security name.
    pub fn guess_sector(&self, security: &str) -> Option<String> {
        let padded = format!(" {} ", clean_company_name(security));
        self.sector_keywords
            .iter()
            .find(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|keyword| padded.contains(&format!(" {keyword} ")))
            })
            .and_then(|(sector, _)| self.sector(sector))
    }

    pub fn lookup_isin(&self, security: &str) -> Option<String> {
        self.isins.lookup(security).map(ToOwned::to_owned)
    }
}
