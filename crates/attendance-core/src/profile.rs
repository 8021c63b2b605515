//! Data-driven ingestion configuration.
//!
//! Sheet variants differ only in header spellings, status vocabulary and the
//! order in which identifier columns are consulted. All of that lives in an
//! [`IngestProfile`] so one parsing engine serves every variant.

use regex::Regex;

use crate::classification::ClassificationTable;
use crate::error::{AttendanceError, Result};

// ── Default tables ────────────────────────────────────────────────────────────

const ID_ALIASES: &[&str] = &[
    "id",
    "e.id",
    "e. id",
    "eid",
    "e id",
    "employee id",
    "emp id",
    "emp. id",
    "employee code",
    "emp code",
    "employee",
];

const SERIAL_ALIASES: &[&str] = &[
    "sl",
    "sl.",
    "sl no",
    "sl. no",
    "sl.no",
    "s.no",
    "s/n",
    "serial",
    "serial no",
    "serial number",
    "no",
    "no.",
];

const NAME_ALIASES: &[&str] = &["name", "employee name", "emp name", "full name", "staff name"];

const STATUS_ALIASES: &[&str] = &["status", "attendance", "state"];

const DATE_ALIASES: &[&str] = &["date", "day"];

const NAME_PROBE: &str = r"(?i)\bname\b";

const ID_PROBE: &str = r"(?i)\b(e\.?\s*)?id\b|\bemp(loyee)?\.?\s*(id|code|no)\b";

const DAY_PATTERNS: &[&str] = &[r"^\d{1,2}$", r"(?i)^day[\s._-]*\d{1,2}$"];

/// Prefix of synthesised identifiers, e.g. `GEN-4`.
pub const SYNTHETIC_ID_PREFIX: &str = "GEN-";

// ── ColumnAliases ─────────────────────────────────────────────────────────────

/// Ordered alias lists per canonical column. Matching is exact after trimming,
/// case-insensitive; earlier aliases win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAliases {
    pub id: Vec<String>,
    pub serial: Vec<String>,
    pub name: Vec<String>,
    pub status: Vec<String>,
    pub date: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            id: owned(ID_ALIASES),
            serial: owned(SERIAL_ALIASES),
            name: owned(NAME_ALIASES),
            status: owned(STATUS_ALIASES),
            date: owned(DATE_ALIASES),
        }
    }
}

// ── HeaderProbes ──────────────────────────────────────────────────────────────

/// Pattern tests used to find the header row and the day columns.
#[derive(Debug, Clone)]
pub struct HeaderProbes {
    /// Matches a cell that looks like a name heading.
    pub name_like: Regex,
    /// Matches a cell that looks like an identifier heading.
    pub id_like: Regex,
    /// A header cell matching any of these becomes a day column.
    pub day_column: Vec<Regex>,
}

impl Default for HeaderProbes {
    fn default() -> Self {
        Self {
            name_like: Regex::new(NAME_PROBE).expect("regex is valid"),
            id_like: Regex::new(ID_PROBE).expect("regex is valid"),
            day_column: DAY_PATTERNS
                .iter()
                .map(|p| Regex::new(p).expect("regex is valid"))
                .collect(),
        }
    }
}

impl HeaderProbes {
    /// Build probes from caller-supplied patterns.
    pub fn from_patterns(name_like: &str, id_like: &str, day_column: &[&str]) -> Result<Self> {
        let compile = |p: &str| {
            Regex::new(p).map_err(|e| AttendanceError::Config(format!("bad pattern {p:?}: {e}")))
        };
        Ok(Self {
            name_like: compile(name_like)?,
            id_like: compile(id_like)?,
            day_column: day_column
                .iter()
                .map(|&p| compile(p))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// `true` when the trimmed cell is a day-column heading.
    pub fn is_day_column(&self, cell: &str) -> bool {
        let cell = cell.trim();
        self.day_column.iter().any(|re| re.is_match(cell))
    }
}

// ── IdPolicy ──────────────────────────────────────────────────────────────────

/// Columns that may supply an employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    Primary,
    Serial,
}

/// Order in which identifier columns are consulted before an id is
/// synthesised from the row position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPolicy {
    pub order: Vec<IdSource>,
    pub synthetic_prefix: String,
}

impl Default for IdPolicy {
    fn default() -> Self {
        Self {
            order: vec![IdSource::Primary, IdSource::Serial],
            synthetic_prefix: SYNTHETIC_ID_PREFIX.to_string(),
        }
    }
}

impl IdPolicy {
    /// Positional id for the 1-based data row `position`.
    pub fn synthesize(&self, position: usize) -> String {
        format!("{}{}", self.synthetic_prefix, position)
    }
}

// ── IngestProfile ─────────────────────────────────────────────────────────────

/// Everything that varies between sheet layouts.
#[derive(Debug, Clone, Default)]
pub struct IngestProfile {
    pub aliases: ColumnAliases,
    pub probes: HeaderProbes,
    pub id_policy: IdPolicy,
    pub classification: ClassificationTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aliases_are_lowercase() {
        let aliases = ColumnAliases::default();
        for list in [&aliases.id, &aliases.serial, &aliases.name, &aliases.status] {
            assert!(list.iter().all(|a| a == &a.to_lowercase()));
        }
    }

    #[test]
    fn test_name_probe() {
        let probes = HeaderProbes::default();
        assert!(probes.name_like.is_match("Name"));
        assert!(probes.name_like.is_match("Employee NAME"));
        assert!(!probes.name_like.is_match("Surnames"));
    }

    #[test]
    fn test_id_probe() {
        let probes = HeaderProbes::default();
        for cell in ["ID", "E.ID", "E. Id", "Employee ID", "Emp Code", "emp.no"] {
            assert!(probes.id_like.is_match(cell), "expected match for {cell:?}");
        }
        for cell in ["Paid", "Idle", "Name", "Status"] {
            assert!(!probes.id_like.is_match(cell), "unexpected match for {cell:?}");
        }
    }

    #[test]
    fn test_day_column_patterns() {
        let probes = HeaderProbes::default();
        for cell in ["1", " 15 ", "31", "Day 3", "day-12", "DAY7"] {
            assert!(probes.is_day_column(cell), "expected day column {cell:?}");
        }
        for cell in ["", "Date", "Day", "1st", "-3", "Name", "2024", "100", "Day 100"] {
            assert!(!probes.is_day_column(cell), "unexpected day column {cell:?}");
        }
    }

    #[test]
    fn test_custom_probes_reject_bad_pattern() {
        let err = HeaderProbes::from_patterns("(", "id", &[]).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_custom_probes_compile() {
        let probes = HeaderProbes::from_patterns("(?i)nombre", "(?i)codigo", &[r"^d\d+$"]).unwrap();
        assert!(probes.name_like.is_match("Nombre"));
        assert!(probes.is_day_column("d4"));
    }

    #[test]
    fn test_id_policy_synthesize() {
        let policy = IdPolicy::default();
        assert_eq!(policy.synthesize(3), "GEN-3");
        assert_eq!(policy.order, vec![IdSource::Primary, IdSource::Serial]);
    }
}
