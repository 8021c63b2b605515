//! Status-code classification table.
//!
//! Maps each recognised status code to the set of [`AttendanceStats`]
//! counters it increments. Codes missing from the table (including `W.H`
//! and blank cells) contribute nothing.
//!
//! Casual and sick leave increment both the present and the absent counters.
//! Reported statistics depend on that, so it is kept as-is.

use crate::models::{AttendanceStats, Counter};

/// One row of a [`ClassificationTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRule {
    /// Upper-case status code, e.g. `"CL"`.
    pub code: String,
    /// Human-readable label used by report views.
    pub label: String,
    /// Counters incremented once per matching entry.
    pub counters: Vec<Counter>,
}

impl StatusRule {
    pub fn new(code: &str, label: &str, counters: &[Counter]) -> Self {
        Self {
            code: code.to_uppercase(),
            label: label.to_string(),
            counters: counters.to_vec(),
        }
    }
}

/// Ordered status vocabulary plus counter mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTable {
    rules: Vec<StatusRule>,
}

impl Default for ClassificationTable {
    fn default() -> Self {
        use Counter::*;
        Self::new(vec![
            StatusRule::new("P", "Present", &[Present]),
            StatusRule::new("A", "Absent", &[Absent, NoReasonAbsent]),
            StatusRule::new("L", "Late", &[Late]),
            StatusRule::new("CL", "Casual leave", &[Present, Absent, CasualLeave]),
            StatusRule::new("SL", "Sick leave", &[Present, Absent, SickLeave]),
            StatusRule::new("EL", "Early leave", &[EarlyLeave]),
            // Recognised for display only.
            StatusRule::new("W.H", "Weekly holiday", &[]),
        ])
    }
}

impl ClassificationTable {
    pub fn new(rules: Vec<StatusRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[StatusRule] {
        &self.rules
    }

    /// Look up the rule for `code` (trimmed, case-insensitive).
    pub fn rule_for(&self, code: &str) -> Option<&StatusRule> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.code.eq_ignore_ascii_case(code))
    }

    /// Counters that `code` increments; empty for unknown codes.
    pub fn counters_for(&self, code: &str) -> &[Counter] {
        self.rule_for(code)
            .map(|rule| rule.counters.as_slice())
            .unwrap_or(&[])
    }

    /// Apply one status code to `stats`, returning the new snapshot.
    pub fn apply(&self, stats: AttendanceStats, code: &str) -> AttendanceStats {
        self.counters_for(code)
            .iter()
            .fold(stats, |acc, counter| acc.incremented(*counter))
    }

    /// Display label for `code`, or `"-"` when the code is unknown.
    pub fn label_for(&self, code: &str) -> &str {
        self.rule_for(code)
            .map(|rule| rule.label.as_str())
            .unwrap_or("-")
    }
}
