//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build strings and never print; the `display_*`
//! functions print status lines to stderr so stdout only carries the result.

use crate::domain::GavGit;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a warning message in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// One line summary of a resolution, e.g. `app: branch develop -> develop-SNAPSHOT`
pub fn format_summary(resolved: &GavGit) -> String {
    format!(
        "{}: {} {} -> {}",
        resolved.artifact_id,
        resolved.ref_type,
        resolved.ref_name,
        style(&resolved.version).green()
    )
}

/// `key=value` lines of the project properties, in their fixed order
pub fn format_properties(resolved: &GavGit) -> String {
    resolved
        .project_properties()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
