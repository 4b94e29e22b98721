//! User interface module - output selection and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Choosing what the command prints for a resolution outcome

use anyhow::Result;

use crate::cli::orchestration::WorkflowResult;

pub mod formatter;

pub use formatter::{
    display_error, display_status, display_warning, format_properties, format_summary,
};

/// What the command prints on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Only the resolved version
    #[default]
    Plain,
    /// `project.commit`, `project.tag` and `project.branch` as key=value lines
    Properties,
    /// The full resolution as JSON
    Json,
}

/// Render a workflow result in the requested format.
///
/// A disabled run prints the declared version unchanged; properties are empty
/// and JSON carries only the version.
pub fn render(result: &WorkflowResult, format: OutputFormat) -> Result<String> {
    match (result, format) {
        (WorkflowResult::Resolved(resolved), OutputFormat::Plain) => Ok(resolved.version.clone()),
        (WorkflowResult::Resolved(resolved), OutputFormat::Properties) => {
            Ok(format_properties(resolved))
        }
        (WorkflowResult::Resolved(resolved), OutputFormat::Json) => {
            Ok(serde_json::to_string_pretty(resolved)?)
        }
        (WorkflowResult::Disabled { declared_version }, OutputFormat::Json) => {
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "version": declared_version,
            }))?)
        }
        (WorkflowResult::Disabled { declared_version }, OutputFormat::Plain) => {
            Ok(declared_version.clone())
        }
        (WorkflowResult::Disabled { .. }, OutputFormat::Properties) => Ok(String::new()),
    }
}
