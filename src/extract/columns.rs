use std::collections::BTreeMap;

use crate::normalize::{clean_isin, parse_number};

use super::types::Role;

/// Header synonyms per role, tested in this order. The first role with a
/// matching synonym claims the column.
const ROLE_SYNONYMS: &[(Role, &[&str])] = &[
    (Role::Isin, &["isin"]),
    (
        Role::PctOfAum,
        &["% to", "% of", "%", "weight", "aum", "pct", "nav"],
    ),
    (
        Role::Quantity,
        &["quantity", "qty", "units", "shares", "no. of"],
    ),
    (Role::MarketValue, &["market", "value", "amount", "mv"]),
    (Role::Sector, &["sector", "industry"]),
    (
        Role::SecurityName,
        &[
            "name",
            "security",
            "stock",
            "company",
            "scrip",
            "holding",
            "issuer",
            "instrument",
        ],
    ),
];

/// Role -> physical column index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: BTreeMap<Role, usize>,
}

impl ColumnSchema {
    pub fn get(&self, role: Role) -> Option<usize> {
        self.columns.get(&role).copied()
    }

    pub fn contains(&self, role: Role) -> bool {
        self.columns.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.columns.keys().copied()
    }

    /// Same role set, regardless of column positions.
    pub fn is_compatible(&self, other: &ColumnSchema) -> bool {
        self.roles().eq(other.roles())
    }
}

pub fn role_for_header_cell(cell: &str) -> Option<Role> {
    let cell = cell.trim().to_lowercase();
    if cell.is_empty() {
        return None;
    }

    ROLE_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.iter().any(|synonym| cell.contains(synonym)))
        .map(|(role, _)| *role)
}

fn assign_roles(header: &[String]) -> ColumnSchema {
    let mut schema = ColumnSchema::default();
    for (index, cell) in header.iter().enumerate() {
        if let Some(role) = role_for_header_cell(cell)
            && !schema.contains(role)
        {
            schema.columns.insert(role, index);
        }
    }
    schema
}

/// Maps a header row to a schema. `None` when no column names the security.
pub fn map_columns(header: &[String]) -> Option<ColumnSchema> {
    let schema = assign_roles(header);
    schema.contains(Role::SecurityName).then_some(schema)
}

/// Candidate header: cells naming at least two distinct roles, and no cell
/// that reads as a figure or an ISIN.
pub fn looks_like_header(row: &[String]) -> bool {
    let populated = row
        .iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<&str>>();

    assign_roles(row).len() >= 2
        && !populated
            .iter()
            .any(|cell| parse_number(cell).is_some() || looks_like_isin(cell))
}

/// A row that would map to a usable schema on its own: the security role plus
/// at least one other.
pub fn is_header_like(row: &[String]) -> bool {
    looks_like_header(row) && map_columns(row).is_some()
}

fn looks_like_isin(cell: &str) -> bool {
    clean_isin(cell)
        .map(|isin| {
            let bytes = isin.as_bytes();
            bytes[1].is_ascii_alphabetic() && bytes[11].is_ascii_digit()
        })
        .unwrap_or(false)
}
