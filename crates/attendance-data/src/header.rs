//! Header-row detection and column resolution.
//!
//! Exported sheets often start with a title block. The header row is the
//! first row carrying both a name-like and an identifier-like heading; rows
//! above it are preamble and are ignored.

use attendance_core::profile::{ColumnAliases, HeaderProbes, IngestProfile};
use tracing::debug;

use crate::tokenizer::RawRow;

// ── Public types ──────────────────────────────────────────────────────────────

/// A header cell recognised as one day of attendance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    /// Source column index.
    pub index: usize,
    /// Trimmed header text, used as the entry label.
    pub label: String,
}

/// Canonical column → source column index. `None` means unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    pub id: Option<usize>,
    pub serial: Option<usize>,
    pub name: Option<usize>,
    pub status: Option<usize>,
    pub date: Option<usize>,
    /// Day columns in left-to-right order.
    pub day_columns: Vec<DayColumn>,
}

impl HeaderMap {
    /// `true` when either identifier column (primary or serial) resolved.
    pub fn has_identifier(&self) -> bool {
        self.id.is_some() || self.serial.is_some()
    }
}

/// Where the header sits and what it maps to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderResolution {
    /// Index of the header row within the tokenized rows.
    pub header_index: usize,
    pub map: HeaderMap,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Locate the header row and resolve its columns.
///
/// Empty input resolves to row 0 with nothing mapped.
pub fn resolve_header(rows: &[RawRow], profile: &IngestProfile) -> HeaderResolution {
    let header_index = find_header_row(rows, &profile.probes);
    let map = rows
        .get(header_index)
        .map(|header| resolve_columns(header, &profile.aliases, &profile.probes))
        .unwrap_or_default();

    debug!(
        header_index,
        id = ?map.id,
        serial = ?map.serial,
        name = ?map.name,
        status = ?map.status,
        day_columns = map.day_columns.len(),
        "header resolved"
    );

    HeaderResolution { header_index, map }
}

/// Index of the first row with both a name-like and an identifier-like cell,
/// or `0` when no row qualifies.
pub fn find_header_row(rows: &[RawRow], probes: &HeaderProbes) -> usize {
    rows.iter()
        .position(|row| {
            let has_name = row.iter().any(|cell| probes.name_like.is_match(cell.trim()));
            let has_id = row.iter().any(|cell| probes.id_like.is_match(cell.trim()));
            has_name && has_id
        })
        .unwrap_or(0)
}

/// Map header cells to canonical columns.
///
/// Each canonical column takes the first alias (in alias order) that equals
/// some header cell; a column claimed once is not reused. Remaining cells
/// matching a day pattern become day columns.
pub fn resolve_columns(header: &[String], aliases: &ColumnAliases, probes: &HeaderProbes) -> HeaderMap {
    let normalised: Vec<String> = header.iter().map(|c| c.trim().to_lowercase()).collect();
    let mut claimed: Vec<usize> = Vec::new();

    let mut claim = |list: &[String]| -> Option<usize> {
        let hit = find_alias(&normalised, list, &claimed)?;
        claimed.push(hit);
        Some(hit)
    };

    let id = claim(aliases.id.as_slice());
    let serial = claim(aliases.serial.as_slice());
    let name = claim(aliases.name.as_slice());
    let status = claim(aliases.status.as_slice());
    let date = claim(aliases.date.as_slice());

    let day_columns = header
        .iter()
        .enumerate()
        .filter(|(i, _)| !claimed.contains(i))
        .filter(|(_, cell)| probes.is_day_column(cell))
        .map(|(index, cell)| DayColumn {
            index,
            label: cell.trim().to_string(),
        })
        .collect();

    HeaderMap {
        id,
        serial,
        name,
        status,
        date,
        day_columns,
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn find_alias(normalised: &[String], aliases: &[String], claimed: &[usize]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        let alias = alias.trim().to_lowercase();
        normalised
            .iter()
            .enumerate()
            .find(|(i, cell)| !claimed.contains(i) && **cell == alias)
            .map(|(i, _)| i)
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
