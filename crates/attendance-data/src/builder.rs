//! Turns resolved data rows into [`Employee`] records.
//!
//! Two sheet shapes are supported:
//!
//! * **wide** – no status column but at least one day column; every row is
//!   one employee with one entry per day column.
//! * **long** – a status column; every row is one entry, grouped by id.
//!
//! In both shapes employees keep first-seen order and ids stay unique: a
//! repeated id appends to the earlier employee.

use std::collections::HashMap;

use attendance_core::models::{DailyEntry, Employee, SourceFormat};
use attendance_core::profile::{IdPolicy, IdSource};
use tracing::{debug, warn};

use crate::header::HeaderMap;
use crate::tokenizer::RawRow;

/// Result of [`build_employees`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub employees: Vec<Employee>,
    pub format: SourceFormat,
    /// Data rows considered (rows after the header).
    pub rows_seen: usize,
    /// Rows skipped because neither an id nor a name was present.
    pub rows_dropped: usize,
}

/// Pick the sheet shape from the resolved header.
pub fn detect_format(map: &HeaderMap) -> SourceFormat {
    match (map.status, map.day_columns.is_empty()) {
        (Some(_), _) => SourceFormat::Long,
        (None, false) => SourceFormat::Wide,
        (None, true) => SourceFormat::Undetermined,
    }
}

/// Build the ordered employee set from the rows following the header.
///
/// Degrades to an empty set when no identifier column resolved or when the
/// shape is undetermined.
pub fn build_employees(map: &HeaderMap, data_rows: &[RawRow], policy: &IdPolicy) -> BuildOutcome {
    let format = detect_format(map);
    let mut outcome = BuildOutcome {
        employees: Vec::new(),
        format,
        rows_seen: data_rows.len(),
        rows_dropped: 0,
    };

    if !map.has_identifier() {
        warn!("no identifier column found; producing no employees");
        return outcome;
    }
    if format == SourceFormat::Undetermined {
        warn!("sheet has neither a status column nor day columns; producing no employees");
        return outcome;
    }

    let mut positions: HashMap<String, usize> = HashMap::new();

    for (i, row) in data_rows.iter().enumerate() {
        let name = cell(row, map.name);
        let id = match derive_id(row, map, policy) {
            Some(id) => id,
            None if name.is_empty() => {
                outcome.rows_dropped += 1;
                continue;
            }
            None => policy.synthesize(i + 1),
        };

        let entries = row_entries(row, map, format);

        match positions.get(&id) {
            Some(&pos) => outcome.employees[pos].daily_entries.extend(entries),
            None => {
                positions.insert(id.clone(), outcome.employees.len());
                let mut employee = Employee::new(id, name);
                employee.daily_entries = entries;
                outcome.employees.push(employee);
            }
        }
    }

    debug!(
        format = %format,
        rows = outcome.rows_seen,
        dropped = outcome.rows_dropped,
        employees = outcome.employees.len(),
        "employees built"
    );

    outcome
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Trimmed cell at `index`; blank when unresolved or past the end of the row.
fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(|s| s.trim())
        .unwrap_or("")
}

/// First non-blank identifier in policy order.
fn derive_id(row: &[String], map: &HeaderMap, policy: &IdPolicy) -> Option<String> {
    policy.order.iter().find_map(|source| {
        let column = match source {
            IdSource::Primary => map.id,
            IdSource::Serial => map.serial,
        };
        let value = cell(row, column);
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn row_entries(row: &[String], map: &HeaderMap, format: SourceFormat) -> Vec<DailyEntry> {
    match format {
        SourceFormat::Wide => map
            .day_columns
            .iter()
            .map(|day| DailyEntry::new(&day.label, cell(row, Some(day.index))))
            .collect(),
        SourceFormat::Long => vec![DailyEntry::new(cell(row, map.date), cell(row, map.status))],
        SourceFormat::Undetermined => Vec::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
