use std::cmp::Reverse;

use crate::decode::{DecodedPage, DetectedTable};
use crate::normalize::{collapse_whitespace, lookup_key};

use super::columns::{looks_like_header, map_columns};
use super::types::{LocatedTable, RawTable, TableConfidence};

const HEADER_SEARCH_ROWS: usize = 3;
const MIN_SIDE_BY_SIDE_WIDTH: usize = 4;

#[derive(Debug, Clone)]
struct Candidate {
    order: usize,
    bbox: Option<[f64; 4]>,
    rows: Vec<Vec<String>>,
    header_index: Option<usize>,
}

impl Candidate {
    fn from_detection(order: usize, detection: &DetectedTable) -> Option<Self> {
        let rows = detection
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| collapse_whitespace(cell.as_deref().unwrap_or_default()))
                    .collect::<Vec<String>>()
            })
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect::<Vec<Vec<String>>>();

        if rows.is_empty() {
            return None;
        }

        let header_index = rows
            .iter()
            .take(HEADER_SEARCH_ROWS)
            .position(|row| looks_like_header(row));

        Some(Self {
            order,
            bbox: detection.bbox,
            rows,
            header_index,
        })
    }

    fn populated_header_cells(&self) -> usize {
        self.header_index
            .map(|index| {
                self.rows[index]
                    .iter()
                    .filter(|cell| !cell.is_empty())
                    .count()
            })
            .unwrap_or(0)
    }

    fn overlaps(&self, other: &Candidate) -> bool {
        if let (Some(left), Some(right)) = (self.bbox, other.bbox) {
            return left[0] < right[2]
                && right[0] < left[2]
                && left[1] < right[3]
                && right[1] < left[3];
        }
        self.rows == other.rows
    }
}

/// Finds the holdings-table candidates on one page, in reading order.
///
/// Overlapping detections are resolved greedily: the candidate with the most
/// populated header cells wins, then the one with more rows, then the one the
/// detector reported first.
pub fn locate_tables(page_index: usize, page: &DecodedPage) -> Vec<LocatedTable> {
    let mut candidates = page
        .tables
        .iter()
        .enumerate()
        .filter_map(|(order, detection)| Candidate::from_detection(order, detection))
        .collect::<Vec<Candidate>>();

    candidates.sort_by_key(|candidate| {
        (
            Reverse(candidate.populated_header_cells()),
            Reverse(candidate.rows.len()),
            candidate.order,
        )
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if kept.iter().any(|existing| existing.overlaps(&candidate)) {
            continue;
        }
        kept.push(candidate);
    }
    kept.sort_by_key(|candidate| candidate.order);

    kept.into_iter()
        .flat_map(|candidate| into_located(page_index, candidate))
        .collect()
}

fn into_located(page_index: usize, candidate: Candidate) -> Vec<LocatedTable> {
    let Some(header_index) = candidate.header_index else {
        return vec![LocatedTable {
            table: RawTable {
                header: Vec::new(),
                rows: candidate.rows,
                page_index,
            },
            confidence: TableConfidence::Headerless,
        }];
    };

    let mut rows = candidate.rows;
    let data = rows.split_off(header_index + 1);
    let header = rows.pop().unwrap_or_default();

    match side_by_side_blocks(&header) {
        Some((left, right)) => [left, right]
            .into_iter()
            .map(|(start, end)| LocatedTable {
                table: RawTable {
                    header: header[start..end].to_vec(),
                    rows: data
                        .iter()
                        .map(|row| slice_padded(row, start, end))
                        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
                        .collect(),
                    page_index,
                },
                confidence: TableConfidence::WithHeader,
            })
            .collect(),
        None => vec![LocatedTable {
            table: RawTable {
                header,
                rows: data,
                page_index,
            },
            confidence: TableConfidence::WithHeader,
        }],
    }
}

/// Column ranges of the two halves when the header repeats itself, as in
/// `Scrip | Weight | Scrip | Weight`. A single blank spacer column between
/// the halves is allowed.
fn side_by_side_blocks(header: &[String]) -> Option<((usize, usize), (usize, usize))> {
    let mut width = header.len();
    while width > 0 && header[width - 1].is_empty() {
        width -= 1;
    }
    if width < MIN_SIDE_BY_SIDE_WIDTH {
        return None;
    }

    let half = width / 2;
    let right_start = if width % 2 == 0 {
        half
    } else if header[half].is_empty() {
        half + 1
    } else {
        return None;
    };

    let same_halves = header[..half]
        .iter()
        .zip(&header[right_start..width])
        .all(|(left, right)| lookup_key(left) == lookup_key(right));

    (same_halves && map_columns(&header[..half]).is_some())
        .then_some(((0, half), (right_start, width)))
}

fn slice_padded(row: &[String], start: usize, end: usize) -> Vec<String> {
    (start..end)
        .map(|index| row.get(index).cloned().unwrap_or_default())
        .collect()
}
