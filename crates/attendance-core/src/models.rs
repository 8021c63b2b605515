use serde::{Deserialize, Serialize};

/// One day of attendance for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    /// Day label taken from the source (a column header or a date cell).
    pub label: String,
    /// Trimmed, upper-cased status token such as `P` or `CL`.
    pub status_code: String,
}

impl DailyEntry {
    /// Build an entry, normalising both the label and the status code.
    pub fn new(label: impl AsRef<str>, status: impl AsRef<str>) -> Self {
        Self {
            label: label.as_ref().trim().to_string(),
            status_code: normalize_status(status.as_ref()),
        }
    }
}

/// Trim and upper-case a raw status cell.
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// An employee and their daily entries in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Non-empty identifier, unique within one ingestion.
    pub id: String,
    /// Display name; may be empty.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub daily_entries: Vec<DailyEntry>,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            daily_entries: Vec::new(),
        }
    }

    /// Name for display, falling back to `"Unnamed"`.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }
}

/// Categorised attendance counters for one employee over one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub present_count: u32,
    pub absent_count: u32,
    pub late_count: u32,
    pub casual_leave_count: u32,
    pub sick_leave_count: u32,
    pub early_leave_count: u32,
    pub no_reason_absent_count: u32,
}

impl AttendanceStats {
    /// Leaves taken with a stated reason (casual + sick).
    pub fn leaves_with_reason(&self) -> u32 {
        self.casual_leave_count + self.sick_leave_count
    }

    /// Return a copy with `counter` incremented by one.
    pub fn incremented(self, counter: Counter) -> Self {
        let mut next = self;
        let slot = match counter {
            Counter::Present => &mut next.present_count,
            Counter::Absent => &mut next.absent_count,
            Counter::Late => &mut next.late_count,
            Counter::CasualLeave => &mut next.casual_leave_count,
            Counter::SickLeave => &mut next.sick_leave_count,
            Counter::EarlyLeave => &mut next.early_leave_count,
            Counter::NoReasonAbsent => &mut next.no_reason_absent_count,
        };
        *slot += 1;
        next
    }
}

/// Names one field of [`AttendanceStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    Present,
    Absent,
    Late,
    CasualLeave,
    SickLeave,
    EarlyLeave,
    NoReasonAbsent,
}

/// Shape of the source sheet as detected during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// One row per employee, one column per day.
    Wide,
    /// One row per employee-day.
    Long,
    /// Neither shape could be recognised; no employees are produced.
    Undetermined,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceFormat::Wide => "wide",
            SourceFormat::Long => "long",
            SourceFormat::Undetermined => "undetermined",
        };
        f.write_str(s)
    }
}
