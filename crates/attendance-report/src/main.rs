mod bootstrap;

use anyhow::{bail, Result};
use attendance_core::classification::ClassificationTable;
use attendance_core::error::AttendanceError;
use attendance_core::formatting::{
    format_daily_log, format_employee_list, format_stats_table, render_biweekly_report,
    ReportNotes,
};
use attendance_core::models::Employee;
use attendance_core::profile::IngestProfile;
use attendance_core::settings::Settings;
use attendance_data::analysis::{EmployeeReport, IngestResult};
use attendance_data::search::{search, select, SearchScope};
use attendance_runtime::data_manager::DataManager;
use attendance_runtime::fetch::HttpFetcher;
use attendance_runtime::source::{SheetLocator, TextSource};
use chrono::{Local, NaiveDate};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("attendance-report v{} starting", env!("CARGO_PKG_VERSION"));

    let source = text_source(&settings)?;
    tracing::info!(source = %source, period = %settings.period, "loading sheet");

    let profile = IngestProfile::default();
    let table = profile.classification.clone();
    let mut manager = DataManager::new(HttpFetcher::new()?, profile);
    let result = manager.refresh(&source).await?;
    tracing::info!(
        employees = result.employees.len(),
        format = %result.metadata.format,
        "sheet ingested"
    );

    let query = settings.query.as_deref().unwrap_or("");
    let visible = search(&result.employees, query, SearchScope::IdOrName);
    let json = settings.format == "json";

    let output = match settings.employee.as_deref() {
        Some(id) => {
            let Some(employee) = select(&visible, Some(id)) else {
                bail!("Employee {} not found among {} matching employees", id, visible.len());
            };
            let report = EmployeeReport::build(employee, settings.period, &table);
            let notes = ReportNotes::default().with_overrides(
                settings.leave_reason.as_deref(),
                settings.activity.as_deref(),
                settings.recommendation.as_deref(),
                settings.behavior.as_deref(),
                settings.comment.as_deref(),
            );
            let today = Local::now().date_naive();
            if json {
                report_json(&report, &notes, today)?
            } else {
                report_text(&report, &notes, &table, today)
            }
        }
        None if json => list_json(result, &visible)?,
        None => format_employee_list(&visible),
    };

    println!("{}", output.trim_end());
    Ok(())
}

/// Choose between a local file and the configured spreadsheet.
fn text_source(settings: &Settings) -> Result<TextSource> {
    if let Some(path) = &settings.input {
        return Ok(TextSource::File(path.clone()));
    }

    let locator = SheetLocator::new(
        settings.sheet_id.clone().unwrap_or_default(),
        settings.sheet_gid.clone(),
    );
    if !locator.is_configured() {
        bail!(
            "{}: pass --input <FILE>, or --sheet-id (or ATTENDANCE_SHEET_ID) with the spreadsheet id or a published 2PACX token",
            AttendanceError::SheetNotConfigured
        );
    }
    Ok(TextSource::Sheet(locator))
}

// ── Rendering ──────────────────────────────────────────────────────────────────

fn report_text(
    report: &EmployeeReport,
    notes: &ReportNotes,
    table: &ClassificationTable,
    submitted: NaiveDate,
) -> String {
    let employee = &report.employee;
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}) - days {}\n\n",
        employee.display_name(),
        employee.id,
        report.period.label()
    ));
    out.push_str(&format_stats_table(&report.stats));
    out.push('\n');
    out.push_str(&format_daily_log(&report.entries_in_period, table));
    out.push('\n');
    out.push_str(&render_biweekly_report(
        employee,
        &report.stats,
        &report.period.label(),
        notes,
        submitted,
    ));
    out
}

fn report_json(report: &EmployeeReport, notes: &ReportNotes, submitted: NaiveDate) -> Result<String> {
    let value = serde_json::json!({
        "report": report,
        "notes": notes,
        "leavesWithReason": report.stats.leaves_with_reason(),
        "submittedDate": submitted.format("%d/%m/%Y").to_string(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn list_json(result: &IngestResult, visible: &[&Employee]) -> Result<String> {
    let value = serde_json::json!({
        "employees": visible,
        "metadata": result.metadata,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
