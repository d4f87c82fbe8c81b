use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::{DecodedDocument, DocumentDecoder};

/// Reads a page dump produced by an external table detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl DocumentDecoder for JsonDecoder {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, path: &Path, max_pages: Option<usize>) -> Result<DecodedDocument> {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let mut document: DecodedDocument = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse decoded document {}", path.display()))?;

        if let Some(max_pages) = max_pages {
            document.pages.truncate(max_pages);
        }

        Ok(document)
    }
}
