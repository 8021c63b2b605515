//! Day-range filtering of daily entries.
//!
//! Labels are read as plain day numbers; no calendar validation is done, so
//! day 31 passes for every month.

use attendance_core::models::DailyEntry;
use attendance_core::period::{DayRange, Period};

/// Day number carried by an entry label.
///
/// Accepts a bare integer (`"7"`) or a labelled day (`"Day 7"`, `"day_07"`).
/// Anything else, including dates and blank labels, yields `None`.
pub fn day_number(label: &str) -> Option<u32> {
    let label = label.trim();
    if let Ok(day) = label.parse::<u32>() {
        return Some(day);
    }

    let lower = label.to_ascii_lowercase();
    let digits = lower
        .strip_prefix("day")?
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '_' | '-'));
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Entries whose label is a day number inside `range`, in source order.
///
/// Entries without a day number are excluded rather than kept as unknown.
pub fn filter_entries(entries: &[DailyEntry], range: DayRange) -> Vec<DailyEntry> {
    entries
        .iter()
        .filter(|entry| day_number(&entry.label).is_some_and(|day| range.contains(day)))
        .cloned()
        .collect()
}

/// Convenience wrapper over [`filter_entries`] for a named period.
pub fn filter_period(entries: &[DailyEntry], period: Period) -> Vec<DailyEntry> {
    filter_entries(entries, period.range())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(labels: &[&str]) -> Vec<DailyEntry> {
        labels.iter().map(|l| DailyEntry::new(l, "P")).collect()
    }

    fn labels(entries: &[DailyEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.label.as_str()).collect()
    }

    // ── day_number ────────────────────────────────────────────────────────────

    #[test]
    fn test_day_number_bare_integer() {
        assert_eq!(day_number("7"), Some(7));
        assert_eq!(day_number(" 15 "), Some(15));
        assert_eq!(day_number("05"), Some(5));
    }

    #[test]
    fn test_day_number_labelled() {
        assert_eq!(day_number("Day 7"), Some(7));
        assert_eq!(day_number("DAY-12"), Some(12));
        assert_eq!(day_number("day_03"), Some(3));
        assert_eq!(day_number("Day7"), Some(7));
    }

    #[test]
    fn test_day_number_rejects_other_text() {
        assert_eq!(day_number(""), None);
        assert_eq!(day_number("2024-09-01"), None);
        assert_eq!(day_number("Day"), None);
        assert_eq!(day_number("Monday"), None);
        assert_eq!(day_number("-3"), None);
        assert_eq!(day_number("Day 1a"), None);
    }

    // ── filter_entries ────────────────────────────────────────────────────────

    #[test]
    fn test_first_half_boundary() {
        let all = entries(&["14", "15", "16"]);
        let out = filter_period(&all, Period::FirstHalf);
        assert_eq!(labels(&out), vec!["14", "15"]);
    }

    #[test]
    fn test_second_half_boundary() {
        let all = entries(&["15", "16", "31"]);
        let out = filter_period(&all, Period::SecondHalf);
        assert_eq!(labels(&out), vec!["16", "31"]);
    }

    #[test]
    fn test_day_31_is_not_calendar_checked() {
        let all = entries(&["31"]);
        assert_eq!(filter_period(&all, Period::Full).len(), 1);
    }

    #[test]
    fn test_non_numeric_labels_excluded() {
        let all = entries(&["1", "", "Total", "2"]);
        let out = filter_period(&all, Period::Full);
        assert_eq!(labels(&out), vec!["1", "2"]);
    }

    #[test]
    fn test_custom_range() {
        let all = entries(&["2", "3", "Day 4", "5", "6"]);
        let out = filter_entries(&all, DayRange::new(3, 5));
        assert_eq!(labels(&out), vec!["3", "Day 4", "5"]);
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let all = entries(&["1", "5", "10"]);
        assert!(filter_entries(&all, DayRange::new(10, 1)).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let all = entries(&["9", "2", "5"]);
        let out = filter_period(&all, Period::Full);
        assert_eq!(labels(&out), vec!["9", "2", "5"]);
    }
}
