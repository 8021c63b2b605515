//! Case-insensitive employee lookup by id and/or name.

use attendance_core::models::Employee;
use serde::{Deserialize, Serialize};

/// Which fields a query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchScope {
    #[default]
    IdOrName,
    IdOnly,
    NameOnly,
}

/// Employees whose id or name contains `query`, ignoring case.
///
/// The query is trimmed first; an empty query returns every employee. Order
/// is always the input order.
pub fn search<'a>(employees: &'a [Employee], query: &str, scope: SearchScope) -> Vec<&'a Employee> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return employees.iter().collect();
    }

    employees
        .iter()
        .filter(|emp| {
            let id_hit = || emp.id.to_lowercase().contains(&needle);
            let name_hit = || emp.name.to_lowercase().contains(&needle);
            match scope {
                SearchScope::IdOrName => id_hit() || name_hit(),
                SearchScope::IdOnly => id_hit(),
                SearchScope::NameOnly => name_hit(),
            }
        })
        .collect()
}

/// Resolve a caller-held selection against the currently visible employees.
///
/// Returns `None` when nothing is selected or the selection is filtered out.
pub fn select<'a>(visible: &[&'a Employee], selected_id: Option<&str>) -> Option<&'a Employee> {
    let selected_id = selected_id?;
    visible.iter().copied().find(|emp| emp.id == selected_id)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> Vec<Employee> {
        vec![
            Employee::new("E001", "Ann Lee"),
            Employee::new("E002", "Bo Chan"),
            Employee::new("X17", "Annette"),
        ]
    }

    fn ids(found: &[&Employee]) -> Vec<String> {
        found.iter().map(|e| e.id.clone()).collect()
    }

    // ── search ────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let all = staff();
        assert_eq!(ids(&search(&all, "", SearchScope::default())), vec!["E001", "E002", "X17"]);
        assert_eq!(search(&all, "   ", SearchScope::default()).len(), 3);
    }

    #[test]
    fn test_no_match_is_empty() {
        let all = staff();
        assert!(search(&all, "zzz", SearchScope::IdOrName).is_empty());
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let all = staff();
        assert_eq!(ids(&search(&all, "ANN", SearchScope::IdOrName)), vec!["E001", "X17"]);
    }

    #[test]
    fn test_id_substring_match() {
        let all = staff();
        assert_eq!(ids(&search(&all, "e00", SearchScope::IdOrName)), vec!["E001", "E002"]);
    }

    #[test]
    fn test_scopes() {
        let all = staff();
        assert!(search(&all, "ann", SearchScope::IdOnly).is_empty());
        assert_eq!(ids(&search(&all, "x1", SearchScope::IdOnly)), vec!["X17"]);
        assert!(search(&all, "x1", SearchScope::NameOnly).is_empty());
        assert_eq!(ids(&search(&all, "chan", SearchScope::NameOnly)), vec!["E002"]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let all = staff();
        assert_eq!(ids(&search(&all, "  bo ", SearchScope::IdOrName)), vec!["E002"]);
    }

    #[test]
    fn test_whitespace_query_returns_all() {
        let all = staff();
        assert_eq!(search(&all, " \t ", SearchScope::NameOnly).len(), all.len());
    }

    // ── select ────────────────────────────────────────────────────────────────

    #[test]
    fn test_select_visible() {
        let all = staff();
        let visible = search(&all, "ann", SearchScope::IdOrName);
        assert_eq!(select(&visible, Some("X17")).map(|e| e.name.as_str()), Some("Annette"));
    }

    #[test]
    fn test_select_hidden_or_missing() {
        let all = staff();
        let visible = search(&all, "ann", SearchScope::IdOrName);
        assert!(select(&visible, Some("E002")).is_none());
        assert!(select(&visible, None).is_none());
    }
}
