use std::path::PathBuf;
use thiserror::Error;

/// Guidance appended when no candidate endpoint produced any data.
const SHEET_ACCESS_HINT: &str = "Check: 1) Did you use the Spreadsheet ID (not the full URL or \
2PACX token unless published)? 2) Is the sheet shared: Anyone with link (Viewer)? 3) If using a \
2PACX token, ensure the sheet is published (File > Share > Publish to web).";

/// All errors produced by the attendance crates.
///
/// The parsing pipeline itself never fails; these variants cover retrieval,
/// configuration and I/O around it.
#[derive(Error, Debug)]
pub enum AttendanceError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or produced.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// No spreadsheet id was supplied (or the placeholder id was left in place).
    #[error("No spreadsheet id configured")]
    SheetNotConfigured,

    /// A single retrieval attempt failed.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Every candidate endpoint was tried and none produced data.
    #[error("Failed to load sheet{}. {}", status_suffix(.last_status), SHEET_ACCESS_HINT)]
    AllCandidatesFailed {
        attempts: usize,
        last_status: Option<u16>,
    },

    /// A period string could not be understood.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

/// Convenience alias used throughout the attendance crates.
pub type Result<T> = std::result::Result<T, AttendanceError>;
