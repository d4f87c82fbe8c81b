use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::{DecodedDocument, DecodedPage, DocumentDecoder};

const MIN_REPEATED_EDGE_PAGES: usize = 3;

/// Text-layer decoder backed by poppler's `pdftotext -layout`.
///
/// Pages carry text only, so every page is served by the fallback pattern
/// extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdftotextDecoder;

impl DocumentDecoder for PdftotextDecoder {
    fn name(&self) -> &'static str {
        "pdftotext"
    }

    fn decode(&self, path: &Path, max_pages: Option<usize>) -> Result<DecodedDocument> {
        let mut pages = extract_pages_with_pdftotext(path, max_pages)?;
        let removed = strip_repeated_edge_lines(&mut pages);
        debug!(path = %path.display(), pages = pages.len(), removed, "decoded text layer");

        Ok(DecodedDocument {
            pages: pages
                .into_iter()
                .map(|text| DecodedPage {
                    text,
                    tables: Vec::new(),
                })
                .collect(),
        })
    }
}

fn extract_pages_with_pdftotext(pdf_path: &Path, max_pages: Option<usize>) -> Result<Vec<String>> {
    let mut command = Command::new("pdftotext");
    command
        .arg("-layout")
        .arg("-enc")
        .arg("UTF-8")
        .arg("-f")
        .arg("1");
    if let Some(max_pages) = max_pages {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
}

fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages
}

/// Drops running headers and footers: first/last non-empty lines that recur
/// on at least three pages.
fn strip_repeated_edge_lines(pages: &mut [String]) -> usize {
    let header_candidates = detect_repeated_edge_lines(pages, true);
    let footer_candidates = detect_repeated_edge_lines(pages, false);
    let mut removed = 0usize;

    for page in pages.iter_mut() {
        let mut lines = page.lines().map(ToOwned::to_owned).collect::<Vec<String>>();

        if let Some(index) = lines.iter().position(|line| !line.trim().is_empty())
            && header_candidates.contains(&normalize_edge_line(&lines[index]))
        {
            lines.remove(index);
            removed += 1;
        }

        if let Some(index) = lines.iter().rposition(|line| !line.trim().is_empty())
            && footer_candidates.contains(&normalize_edge_line(&lines[index]))
        {
            lines.remove(index);
            removed += 1;
        }

        *page = lines.join("\n");
    }

    removed
}

fn detect_repeated_edge_lines(pages: &[String], header: bool) -> HashSet<String> {
    let mut counts = HashMap::<String, usize>::new();
    for page in pages {
        let mut lines = page.lines().map(str::trim).filter(|line| !line.is_empty());
        let candidate = if header { lines.next() } else { lines.next_back() };

        let Some(candidate) = candidate else {
            continue;
        };

        let normalized = normalize_edge_line(candidate);
        if normalized.is_empty() || normalized.len() > 120 {
            continue;
        }
        *counts.entry(normalized).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter_map(|(candidate, count)| (count >= MIN_REPEATED_EDGE_PAGES).then_some(candidate))
        .collect()
}

fn normalize_edge_line(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_pages_drops_trailing_blank_pages() {
        let pages = split_pages("first\u{000C}second\u{0000}\u{000C}  \n\u{000C}");
        assert_eq!(pages, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn strip_repeated_edge_lines_removes_running_headers_and_footers() {
        let mut pages = (1..=3)
            .map(|page| {
                format!("Motilal Oswal Factsheet\nAcme Ltd 3.25%\nPage footer  text\nPage {page}")
            })
            .collect::<Vec<String>>();
        pages.push("Motilal  Oswal Factsheet\nOnly body".to_string());

        let removed = strip_repeated_edge_lines(&mut pages);

        assert_eq!(removed, 4);
        assert!(pages.iter().all(|page| !page.starts_with("Motilal")));
        assert!(pages[0].contains("Acme Ltd 3.25%"));
        assert!(pages[0].ends_with("Page 1"));
        assert_eq!(pages[3], "Only body");
    }
}
