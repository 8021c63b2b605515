//! Plain-text rendering of employee lists, statistics and the bi-weekly
//! performance report.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::classification::ClassificationTable;
use crate::models::{AttendanceStats, DailyEntry, Employee};

/// Maximum number of daily log rows rendered for one employee.
pub const MAX_LOG_ROWS: usize = 150;

const NOT_AVAILABLE: &str = "N/A";

/// Pad `s` with trailing spaces to `width` terminal columns.
///
/// Width is measured in display columns, so wide (CJK) characters count
/// twice. Strings already at or beyond `width` are returned unchanged.
///
/// # Examples
///
/// ```
/// use attendance_core::formatting::pad_to_width;
///
/// assert_eq!(pad_to_width("Ann", 5), "Ann  ");
/// assert_eq!(pad_to_width("Annabelle", 5), "Annabelle");
/// ```
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + (width - current));
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width - current));
    out
}

/// One line per employee: display name then id, names aligned.
///
/// Returns `"No matches."` for an empty list.
pub fn format_employee_list(employees: &[&Employee]) -> String {
    if employees.is_empty() {
        return "No matches.".to_string();
    }

    let name_width = employees
        .iter()
        .map(|e| UnicodeWidthStr::width(e.display_name()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for emp in employees {
        let _ = writeln!(
            out,
            "{}  ID: {}",
            pad_to_width(emp.display_name(), name_width),
            emp.id
        );
    }
    out
}

/// Two-column table of every counter plus the derived with-reason total.
pub fn format_stats_table(stats: &AttendanceStats) -> String {
    let rows: [(&str, u32); 8] = [
        ("Present", stats.present_count),
        ("Absent", stats.absent_count),
        ("Late", stats.late_count),
        ("Casual leave", stats.casual_leave_count),
        ("Sick leave", stats.sick_leave_count),
        ("Early leave", stats.early_leave_count),
        ("Without reason", stats.no_reason_absent_count),
        ("With reason", stats.leaves_with_reason()),
    ];
    let label_width = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{}  {}", pad_to_width(label, label_width), value);
    }
    out
}

/// Date/status table for an employee's entries, capped at [`MAX_LOG_ROWS`].
pub fn format_daily_log(entries: &[DailyEntry], table: &ClassificationTable) -> String {
    let label_width = entries
        .iter()
        .take(MAX_LOG_ROWS)
        .map(|e| e.label.width())
        .max()
        .unwrap_or(0)
        .max("Date".len());

    let mut out = String::new();
    let _ = writeln!(out, "{}  Status", pad_to_width("Date", label_width));
    for entry in entries.iter().take(MAX_LOG_ROWS) {
        let label = if entry.label.is_empty() {
            "-"
        } else {
            entry.label.as_str()
        };
        let _ = writeln!(
            out,
            "{}  {}",
            pad_to_width(label, label_width),
            table.label_for(&entry.status_code)
        );
    }
    if entries.len() > MAX_LOG_ROWS {
        let _ = writeln!(out, "... {} more", entries.len() - MAX_LOG_ROWS);
    }
    out
}

// ── Bi-weekly report ──────────────────────────────────────────────────────────

/// Free-text fields an HR reviewer fills in on the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNotes {
    pub leave_reason: String,
    pub activity: String,
    pub recommendation: String,
    pub behavior: String,
    pub comment: String,
}

impl Default for ReportNotes {
    fn default() -> Self {
        Self {
            leave_reason: NOT_AVAILABLE.to_string(),
            activity: NOT_AVAILABLE.to_string(),
            recommendation: NOT_AVAILABLE.to_string(),
            behavior: "Good".to_string(),
            comment: NOT_AVAILABLE.to_string(),
        }
    }
}

impl ReportNotes {
    /// Replace defaults with any non-blank overrides.
    pub fn with_overrides(
        mut self,
        leave_reason: Option<&str>,
        activity: Option<&str>,
        recommendation: Option<&str>,
        behavior: Option<&str>,
        comment: Option<&str>,
    ) -> Self {
        let pick = |slot: &mut String, value: Option<&str>| {
            if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
                *slot = v.to_string();
            }
        };
        pick(&mut self.leave_reason, leave_reason);
        pick(&mut self.activity, activity);
        pick(&mut self.recommendation, recommendation);
        pick(&mut self.behavior, behavior);
        pick(&mut self.comment, comment);
        self
    }
}

/// Render the "Performance tracking report (Bi-weekly)" for one employee.
pub fn render_biweekly_report(
    employee: &Employee,
    stats: &AttendanceStats,
    period_label: &str,
    notes: &ReportNotes,
    submitted: NaiveDate,
) -> String {
    let range = if period_label.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        period_label
    };

    let mut out = String::new();
    let _ = writeln!(out, "Performance tracking report (Bi-weekly)");
    let _ = writeln!(out, "(Report from HR department) ({})", range);
    let _ = writeln!(out);
    let _ = writeln!(out, "Employee name - {}", employee.name);
    let _ = writeln!(out, "Employee ID - {}", employee.id);
    let _ = writeln!(
        out,
        "Attendance – {} days Leave | Late attendance – {} days",
        stats.absent_count, stats.late_count
    );
    let _ = writeln!(
        out,
        "Early Leave - {} | Leaves (without reason) - {}",
        stats.early_leave_count, stats.no_reason_absent_count
    );
    let _ = writeln!(
        out,
        "Leaves (with reason) - {} | {}",
        stats.leaves_with_reason(),
        notes.leave_reason
    );
    let _ = writeln!(out, "Activity - {}", notes.activity);
    let _ = writeln!(out, "Suggestion or Recommendations - {}", notes.recommendation);
    let _ = writeln!(out, "Behavior - {}", notes.behavior);
    let _ = writeln!(out, "Comment - {}", notes.comment);
    let _ = writeln!(out, "Submitted Date – {}", submitted.format("%d/%m/%Y"));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "*** Attach additional documents or attachments with this report ***"
    );
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Counter;

    fn employee(id: &str, name: &str) -> Employee {
        Employee::new(id, name)
    }

    // ── pad_to_width ─────────────────────────────────────────────────────────

    #[test]
    fn test_pad_to_width_wide_chars() {
        // Each CJK character occupies two columns.
        assert_eq!(pad_to_width("山田", 6), "山田  ");
    }

    #[test]
    fn test_pad_to_width_exact() {
        assert_eq!(pad_to_width("abc", 3), "abc");
    }

    // ── format_employee_list ─────────────────────────────────────────────────

    #[test]
    fn test_format_employee_list_empty() {
        assert_eq!(format_employee_list(&[]), "No matches.");
    }

    #[test]
    fn test_format_employee_list_aligns_names() {
        let a = employee("E1", "Ann");
        let b = employee("E2", "Bartholomew");
        let c = employee("E3", "");
        let out = format_employee_list(&[&a, &b, &c]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Ann          ID: E1");
        assert_eq!(lines[1], "Bartholomew  ID: E2");
        assert!(lines[2].starts_with("Unnamed"));
    }

    // ── format_stats_table ───────────────────────────────────────────────────

    #[test]
    fn test_format_stats_table_includes_with_reason() {
        let stats = AttendanceStats::default()
            .incremented(Counter::CasualLeave)
            .incremented(Counter::SickLeave);
        let out = format_stats_table(&stats);
        assert!(out.contains("With reason     2"));
        assert_eq!(out.lines().count(), 8);
    }

    // ── format_daily_log ─────────────────────────────────────────────────────

    #[test]
    fn test_format_daily_log_labels() {
        let entries = vec![
            DailyEntry::new("1", "P"),
            DailyEntry::new("", "SL"),
            DailyEntry::new("3", "??"),
        ];
        let out = format_daily_log(&entries, &ClassificationTable::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Date  Status");
        assert_eq!(lines[1], "1     Present");
        assert_eq!(lines[2], "-     Sick leave");
        assert_eq!(lines[3], "3     -");
    }

    #[test]
    fn test_format_daily_log_caps_rows() {
        let entries: Vec<DailyEntry> = (0..160).map(|i| DailyEntry::new(i.to_string(), "P")).collect();
        let out = format_daily_log(&entries, &ClassificationTable::default());
        // Header + capped rows + overflow note.
        assert_eq!(out.lines().count(), 1 + MAX_LOG_ROWS + 1);
        assert!(out.ends_with("... 10 more\n"));
    }

    // ── ReportNotes ──────────────────────────────────────────────────────────

    #[test]
    fn test_report_notes_defaults() {
        let notes = ReportNotes::default();
        assert_eq!(notes.behavior, "Good");
        assert_eq!(notes.comment, "N/A");
    }

    #[test]
    fn test_report_notes_overrides_skip_blank() {
        let notes = ReportNotes::default().with_overrides(None, Some("Sprint work"), Some("  "), None, Some("ok"));
        assert_eq!(notes.activity, "Sprint work");
        assert_eq!(notes.recommendation, "N/A");
        assert_eq!(notes.comment, "ok");
    }

    // ── render_biweekly_report ───────────────────────────────────────────────

    #[test]
    fn test_render_biweekly_report() {
        let emp = employee("E001", "Ann");
        let stats = AttendanceStats::default()
            .incremented(Counter::Absent)
            .incremented(Counter::NoReasonAbsent)
            .incremented(Counter::Late);
        let date = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        let out = render_biweekly_report(&emp, &stats, "1-15", &ReportNotes::default(), date);

        assert!(out.starts_with("Performance tracking report (Bi-weekly)\n"));
        assert!(out.contains("(Report from HR department) (1-15)"));
        assert!(out.contains("Employee name - Ann"));
        assert!(out.contains("Employee ID - E001"));
        assert!(out.contains("Attendance – 1 days Leave | Late attendance – 1 days"));
        assert!(out.contains("Leaves (without reason) - 1"));
        assert!(out.contains("Leaves (with reason) - 0 | N/A"));
        assert!(out.contains("Behavior - Good"));
        assert!(out.contains("Submitted Date – 16/09/2024"));
        assert!(out.trim_end().ends_with("***"));
    }

    #[test]
    fn test_render_biweekly_report_blank_range() {
        let emp = employee("E1", "Bo");
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let out = render_biweekly_report(&emp, &AttendanceStats::default(), " ", &ReportNotes::default(), date);
        assert!(out.contains("(Report from HR department) (N/A)"));
    }
}
