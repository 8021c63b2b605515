//! Where sheet text comes from: a published or shared spreadsheet, or a
//! local export on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use attendance_core::error::{AttendanceError, Result};

/// Placeholder id shipped in sample configuration; treated as unset.
pub const PLACEHOLDER_SHEET_ID: &str = "REPLACE_WITH_SHEET_ID";

/// Prefix of "publish to web" tokens, which use a different URL scheme.
const PUBLISHED_PREFIX: &str = "2PACX";

const SHEETS_BASE: &str = "https://docs.google.com/spreadsheets/d";

// ── SheetLocator ──────────────────────────────────────────────────────────────

/// Identifies one spreadsheet (and optionally one tab of it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocator {
    pub sheet_id: String,
    /// Tab id; `None` means the first tab.
    pub gid: Option<String>,
}

impl SheetLocator {
    /// Build a locator, trimming both parts. A blank gid becomes `None`.
    pub fn new(sheet_id: impl Into<String>, gid: Option<String>) -> Self {
        let sheet_id = sheet_id.into().trim().to_string();
        let gid = gid
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());
        Self { sheet_id, gid }
    }

    /// `false` for a blank id or the shipped placeholder.
    pub fn is_configured(&self) -> bool {
        !self.sheet_id.is_empty() && self.sheet_id != PLACEHOLDER_SHEET_ID
    }

    /// `true` when the id is a "publish to web" token.
    pub fn is_published(&self) -> bool {
        self.sheet_id.starts_with(PUBLISHED_PREFIX)
    }

    /// CSV export endpoints to try, most specific first.
    ///
    /// Published tokens have exactly one endpoint. Regular ids try the
    /// tab-specific endpoints (when a gid is set) before the first-tab ones.
    /// An unconfigured locator yields no candidates.
    pub fn candidate_urls(&self) -> Vec<String> {
        if !self.is_configured() {
            return Vec::new();
        }

        let id = &self.sheet_id;
        if self.is_published() {
            let gid = self
                .gid
                .as_ref()
                .map(|g| format!("&gid={}", g))
                .unwrap_or_default();
            return vec![format!("{}/e/{}/pub?output=csv{}", SHEETS_BASE, id, gid)];
        }

        let mut urls = Vec::with_capacity(4);
        if let Some(gid) = &self.gid {
            urls.push(format!("{}/{}/gviz/tq?tqx=out:csv&gid={}", SHEETS_BASE, id, gid));
            urls.push(format!("{}/{}/export?format=csv&gid={}", SHEETS_BASE, id, gid));
        }
        urls.push(format!("{}/{}/export?format=csv", SHEETS_BASE, id));
        urls.push(format!("{}/{}/gviz/tq?tqx=out:csv", SHEETS_BASE, id));
        urls
    }
}

// ── TextSource ────────────────────────────────────────────────────────────────

/// A place the raw sheet text can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// A CSV export on the local filesystem.
    File(PathBuf),
    /// A remote spreadsheet reached through its export endpoints.
    Sheet(SheetLocator),
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSource::File(path) => write!(f, "file {}", path.display()),
            TextSource::Sheet(locator) => write!(f, "sheet {}", locator.sheet_id),
        }
    }
}

/// Read a local export.
pub async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AttendanceError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── SheetLocator ──────────────────────────────────────────────────────────

    #[test]
    fn test_unconfigured_has_no_candidates() {
        assert!(SheetLocator::new("", None).candidate_urls().is_empty());
        assert!(SheetLocator::new("  ", Some("0".into())).candidate_urls().is_empty());
        assert!(SheetLocator::new(PLACEHOLDER_SHEET_ID, None)
            .candidate_urls()
            .is_empty());
    }

    #[test]
    fn test_regular_id_without_gid() {
        let urls = SheetLocator::new("abc123", None).candidate_urls();
        assert_eq!(
            urls,
            vec![
                "https://docs.google.com/spreadsheets/d/abc123/export?format=csv",
                "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:csv",
            ]
        );
    }

    #[test]
    fn test_regular_id_with_gid() {
        let urls = SheetLocator::new("abc123", Some("42".into())).candidate_urls();
        assert_eq!(
            urls,
            vec![
                "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:csv&gid=42",
                "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=42",
                "https://docs.google.com/spreadsheets/d/abc123/export?format=csv",
                "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:csv",
            ]
        );
    }

    #[test]
    fn test_published_token() {
        let plain = SheetLocator::new("2PACX-xyz", None).candidate_urls();
        assert_eq!(
            plain,
            vec!["https://docs.google.com/spreadsheets/d/e/2PACX-xyz/pub?output=csv"]
        );

        let tab = SheetLocator::new("2PACX-xyz", Some("7".into())).candidate_urls();
        assert_eq!(
            tab,
            vec!["https://docs.google.com/spreadsheets/d/e/2PACX-xyz/pub?output=csv&gid=7"]
        );
    }

    #[test]
    fn test_blank_gid_is_ignored() {
        let loc = SheetLocator::new(" abc ", Some("  ".into()));
        assert_eq!(loc.sheet_id, "abc");
        assert!(loc.gid.is_none());
        assert_eq!(loc.candidate_urls().len(), 2);
    }

    // ── read_file ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, "ID,Name\nE1,Ann\n").unwrap();
        assert_eq!(read_file(&path).await.unwrap(), "ID,Name\nE1,Ann\n");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_file(&dir.path().join("missing.csv")).await.unwrap_err();
        assert!(matches!(err, AttendanceError::FileRead { .. }));
    }
}
