//! Top-level ingestion pipeline.
//!
//! Runs tokenize → header resolution → record building in one synchronous
//! pass and returns an [`IngestResult`] for the presentation layer. Each call
//! is a pure function of its input text; a new result replaces the previous
//! one wholesale.

use attendance_core::classification::ClassificationTable;
use attendance_core::models::{AttendanceStats, DailyEntry, Employee, SourceFormat};
use attendance_core::period::Period;
use attendance_core::profile::IngestProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::aggregate;
use crate::builder::build_employees;
use crate::filter::filter_period;
use crate::header::resolve_header;
use crate::tokenizer::tokenize;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the employee set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestMetadata {
    /// Non-blank rows produced by the tokenizer.
    pub rows_tokenized: usize,
    /// Index of the detected header row.
    pub header_row_index: usize,
    pub format: SourceFormat,
    /// Rows after the header.
    pub data_rows_seen: usize,
    /// Rows skipped for lacking both id and name.
    pub rows_dropped: usize,
    pub employees_built: usize,
    /// ISO-8601 time the result was accepted by a loader. [`ingest`] itself
    /// leaves it unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// The complete output of [`ingest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResult {
    pub employees: Vec<Employee>,
    pub metadata: IngestMetadata,
}

impl IngestResult {
    /// Look up an employee by exact id.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|emp| emp.id == id)
    }
}

/// One employee's entries and statistics over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReport {
    pub employee: Employee,
    pub period: Period,
    pub entries_in_period: Vec<DailyEntry>,
    pub stats: AttendanceStats,
}

impl EmployeeReport {
    /// Filter `employee`'s entries to `period` and aggregate them.
    pub fn build(employee: &Employee, period: Period, table: &ClassificationTable) -> Self {
        let entries_in_period = filter_period(&employee.daily_entries, period);
        let stats = aggregate(&entries_in_period, table);
        Self {
            employee: employee.clone(),
            period,
            entries_in_period,
            stats,
        }
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Parse raw delimited text into an ordered employee set.
///
/// Never fails: malformed or unrecognisable input degrades to an empty set
/// and the metadata records how far the pipeline got.
pub fn ingest(text: &str, profile: &IngestProfile) -> IngestResult {
    let rows = tokenize(text);
    let resolution = resolve_header(&rows, profile);
    let data_rows = rows.get(resolution.header_index + 1..).unwrap_or(&[]);
    let outcome = build_employees(&resolution.map, data_rows, &profile.id_policy);

    let metadata = IngestMetadata {
        rows_tokenized: rows.len(),
        header_row_index: resolution.header_index,
        format: outcome.format,
        data_rows_seen: outcome.rows_seen,
        rows_dropped: outcome.rows_dropped,
        employees_built: outcome.employees.len(),
        generated_at: None,
    };

    debug!(
        rows = metadata.rows_tokenized,
        header = metadata.header_row_index,
        format = %metadata.format,
        employees = metadata.employees_built,
        "ingestion complete"
    );

    IngestResult {
        employees: outcome.employees,
        metadata,
    }
}

/// Reports for every employee over one period, in employee order.
pub fn report_all(result: &IngestResult, period: Period, table: &ClassificationTable) -> Vec<EmployeeReport> {
    result
        .employees
        .iter()
        .map(|emp| EmployeeReport::build(emp, period, table))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
