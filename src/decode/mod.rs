//! Document decoding collaborators.
//!
//! The extraction core only needs, per page, the tables a detector found and
//! the page's plain text. Decoders turn a source file into that shape.

use std::path::Path;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::DecoderKind;

mod json;
mod pdftotext;

pub use json::JsonDecoder;
pub use pdftotext::PdftotextDecoder;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedDocument {
    #[serde(default)]
    pub pages: Vec<DecodedPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedPage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tables: Vec<DetectedTable>,
}

/// One geometric table detection: rows of cells, `None` for empty cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectedTable {
    pub rows: Vec<Vec<Option<String>>>,
    /// `[x0, top, x1, bottom]` in page coordinates when the detector reports it.
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
}

impl DecodedDocument {
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<&str>>()
            .join("\n")
    }
}

pub trait DocumentDecoder: Sync {
    fn name(&self) -> &'static str;

    fn decode(&self, path: &Path, max_pages: Option<usize>) -> Result<DecodedDocument>;
}

/// Resolves `kind` against the file extension of `path`.
pub fn decoder_for(kind: DecoderKind, path: &Path) -> Result<&'static dyn DocumentDecoder> {
    static JSON: JsonDecoder = JsonDecoder;
    static PDFTOTEXT: PdftotextDecoder = PdftotextDecoder;

    match kind {
        DecoderKind::Json => Ok(&JSON),
        DecoderKind::Pdftotext => Ok(&PDFTOTEXT),
        DecoderKind::Auto => {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase())
                .unwrap_or_default();
            match extension.as_str() {
                "json" => Ok(&JSON),
                "pdf" => Ok(&PDFTOTEXT),
                other => bail!(
                    "no decoder for extension '{}' of {}",
                    other,
                    path.display()
                ),
            }
        }
    }
}

pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf") || ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
