//! Attendance statistics over a sequence of daily entries.

use attendance_core::classification::ClassificationTable;
use attendance_core::models::{AttendanceStats, DailyEntry};

// ── AttendanceAggregator ──────────────────────────────────────────────────────

/// Folds daily entries into one [`AttendanceStats`] snapshot using a
/// classification table.
#[derive(Debug, Clone, Default)]
pub struct AttendanceAggregator {
    table: ClassificationTable,
}

impl AttendanceAggregator {
    pub fn new(table: ClassificationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    /// Count every entry. Codes without a rule (blank, `W.H`, unknown) add
    /// nothing.
    pub fn aggregate(&self, entries: &[DailyEntry]) -> AttendanceStats {
        aggregate(entries, &self.table)
    }
}

/// Free-function form of [`AttendanceAggregator::aggregate`].
pub fn aggregate(entries: &[DailyEntry], table: &ClassificationTable) -> AttendanceStats {
    entries
        .iter()
        .fold(AttendanceStats::default(), |stats, entry| {
            table.apply(stats, &entry.status_code)
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(codes: &[&str]) -> Vec<DailyEntry> {
        codes
            .iter()
            .enumerate()
            .map(|(i, code)| DailyEntry::new((i + 1).to_string(), code))
            .collect()
    }

    fn run(codes: &[&str]) -> AttendanceStats {
        AttendanceAggregator::default().aggregate(&entries(codes))
    }

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(run(&[]), AttendanceStats::default());
    }

    #[test]
    fn test_basic_codes() {
        let stats = run(&["P", "P", "A", "L", "EL"]);
        assert_eq!(stats.present_count, 2);
        assert_eq!(stats.absent_count, 1);
        assert_eq!(stats.no_reason_absent_count, 1);
        assert_eq!(stats.late_count, 1);
        assert_eq!(stats.early_leave_count, 1);
    }

    #[test]
    fn test_casual_leave_counts_present_and_absent() {
        let stats = run(&["CL"]);
        assert_eq!(stats.present_count, 1);
        assert_eq!(stats.absent_count, 1);
        assert_eq!(stats.casual_leave_count, 1);
        assert_eq!(stats.no_reason_absent_count, 0);
    }

    #[test]
    fn test_sick_leave_counts_present_and_absent() {
        let stats = run(&["SL", "SL"]);
        assert_eq!(stats.present_count, 2);
        assert_eq!(stats.absent_count, 2);
        assert_eq!(stats.sick_leave_count, 2);
        assert_eq!(stats.leaves_with_reason(), 2);
    }

    #[test]
    fn test_ignored_codes() {
        assert_eq!(run(&["W.H", "", "X", "HOLIDAY"]), AttendanceStats::default());
    }

    #[test]
    fn test_lowercase_codes_are_normalized() {
        // DailyEntry::new upper-cases the code before it reaches the table.
        let stats = run(&["p", " cl "]);
        assert_eq!(stats.present_count, 2);
        assert_eq!(stats.casual_leave_count, 1);
    }

    #[test]
    fn test_free_function_matches_aggregator() {
        let list = entries(&["P", "A", "SL"]);
        let table = ClassificationTable::default();
        assert_eq!(
            aggregate(&list, &table),
            AttendanceAggregator::new(table.clone()).aggregate(&list)
        );
    }
}
