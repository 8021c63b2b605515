use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::period::Period;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Attendance statistics and bi-weekly reports from an exported spreadsheet
#[derive(Parser, Debug, Clone)]
#[command(
    name = "attendance-report",
    about = "Attendance statistics and bi-weekly reports from an exported spreadsheet",
    version
)]
pub struct Settings {
    /// Read the sheet from a local CSV file instead of fetching it
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Spreadsheet id (the part between /d/ and /edit) or a published 2PACX token
    #[arg(long, env = "ATTENDANCE_SHEET_ID")]
    pub sheet_id: Option<String>,

    /// Optional tab gid
    #[arg(long, env = "ATTENDANCE_SHEET_GID")]
    pub sheet_gid: Option<String>,

    /// Period: full, first-half, second-half or START-END
    #[arg(long, default_value = "full")]
    pub period: Period,

    /// Filter employees by id or name (case-insensitive substring)
    #[arg(long)]
    pub query: Option<String>,

    /// Employee id to report on
    #[arg(long)]
    pub employee: Option<String>,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Report note: reason given for leaves
    #[arg(long)]
    pub leave_reason: Option<String>,

    /// Report note: activity
    #[arg(long)]
    pub activity: Option<String>,

    /// Report note: suggestion or recommendations
    #[arg(long)]
    pub recommendation: Option<String>,

    /// Report note: behavior
    #[arg(long)]
    pub behavior: Option<String>,

    /// Report note: comment
    #[arg(long)]
    pub comment: Option<String>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.attendance-report/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_gid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".attendance-report").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::apply_debug_flag(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI (and environment) always win over persisted values.
        if settings.sheet_id.is_none() {
            settings.sheet_id = last.sheet_id;
        }
        if settings.sheet_gid.is_none() {
            settings.sheet_gid = last.sheet_gid;
        }
        if !is_arg_explicitly_set(&matches, "period") {
            if let Some(p) = last.period {
                settings.period = p;
            }
        }
        if !is_arg_explicitly_set(&matches, "format") {
            if let Some(f) = last.format {
                settings.format = f;
            }
        }

        settings = Self::apply_debug_flag(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::debug!(error = %e, "could not persist last-used parameters");
        }

        settings
    }

    fn apply_debug_flag(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            sheet_id: s.sheet_id.clone(),
            sheet_gid: s.sheet_gid.clone(),
            period: Some(s.period),
            format: Some(s.format.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
