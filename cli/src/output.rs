//! Output formatting utilities for CLI commands

use colored::Colorize;
use tablesift_engine::{FilterPage, PassReport};
use tablesift_shared::Row;

/// Print success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print warning message
pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print the table rows with a visibility marker
pub fn rows(page: &FilterPage, show_excluded: bool) {
    for row in page.rows() {
        if row.excluded && !show_excluded {
            continue;
        }
        println!("  {}", row_line(row));
    }
}

fn row_line(row: &Row) -> String {
    if row.excluded {
        format!(
            "{} {}  {}",
            "✗".red(),
            row.id,
            format!("excluded by {}", row.excluded_by().join(", ")).dimmed()
        )
    } else {
        format!("{} {}", "✓".green(), row.id)
    }
}

/// Print which filters are enabled
pub fn filters(page: &FilterPage) {
    let enabled: Vec<&str> = page
        .filter_ids()
        .iter()
        .filter(|id| page.is_enabled(id))
        .map(String::as_str)
        .collect();

    if enabled.is_empty() {
        info("No filters enabled");
    } else {
        info(&format!("Enabled filters: {}", enabled.join(", ")));
    }
}

/// One-line summary of a pass
pub fn summary(report: &PassReport) -> String {
    format!(
        "{} of {} rows visible, {} excluded",
        report.visible, report.rows, report.excluded
    )
}

/// Warn about filters switched off for lack of criteria
pub fn self_disabled(report: &PassReport) {
    if !report.self_disabled.is_empty() {
        warning(&format!(
            "Switched off (no criteria): {}",
            report.self_disabled.join(", ")
        ));
    }
}
