//! Rendering of the final outcome for people, scripts, and GitHub Actions.
//!
//! The GitHub Actions outputs mirror the action interface: `success`
//! (`true`/`false`), `message`, and `version-number` (`-1` on failure).

use std::io::Write;

use camino::Utf8Path;
use place_publish::Outcome;
use serde::Serialize;

use crate::error::{CliError, Result};

/// Message reported on success.
const PUBLISHED_MESSAGE: &str = "Published!";

/// Delimiter used for multi-line GitHub output values.
const OUTPUT_DELIMITER: &str = "PLACE_PUBLISH_EOF";

/// A flattened, serialisable view of an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Whether the place was published.
    pub success: bool,
    /// `Published!` or the failure reason.
    pub message: String,
    /// The new version number, or `-1` on failure.
    pub version_number: i64,
    /// HTTP status behind a failure, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl From<&Outcome> for Report {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Success { version_number } => Self {
                success: true,
                message: PUBLISHED_MESSAGE.to_owned(),
                version_number: i64::try_from(version_number.get()).unwrap_or(i64::MAX),
                status_code: None,
            },
            Outcome::Failure(failure) => Self {
                success: false,
                message: failure.reason().to_owned(),
                version_number: -1,
                status_code: failure.status_code(),
            },
        }
    }
}

/// Format a one-line human-readable summary.
#[must_use]
pub fn format_human(report: &Report) -> String {
    if report.success {
        format!("Published version {}", report.version_number)
    } else {
        format!("Publish failed: {}", report.message)
    }
}

/// Format the report as pretty-printed JSON.
#[must_use]
pub fn format_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_owned())
}

/// Format the report as GitHub Actions output assignments.
#[must_use]
pub fn github_output_lines(report: &Report) -> String {
    let mut lines = String::new();
    push_output(&mut lines, "success", &report.success.to_string());
    push_output(&mut lines, "message", &report.message);
    push_output(&mut lines, "version-number", &report.version_number.to_string());
    lines
}

fn push_output(lines: &mut String, name: &str, value: &str) {
    if value.contains('\n') || value.contains('\r') {
        let mut delimiter = OUTPUT_DELIMITER.to_owned();
        while value.contains(&delimiter) {
            delimiter.push('_');
        }
        lines.push_str(&format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"));
    } else {
        lines.push_str(&format!("{name}={value}\n"));
    }
}

/// Append the outputs to the GitHub Actions output file at `path`.
///
/// # Errors
///
/// Returns [`CliError::GithubOutput`] if the file cannot be opened or written.
pub fn append_github_outputs(path: &Utf8Path, report: &Report) -> Result<()> {
    let to_error = |source| CliError::GithubOutput {
        path: path.to_owned(),
        source,
    };
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)?;
    file.write_all(github_output_lines(report).as_bytes())
        .map_err(to_error)
}

/// The `::error::` workflow command for a failed report.
#[must_use]
pub fn error_annotation(report: &Report) -> Option<String> {
    (!report.success).then(|| format!("::error::{}", escape_workflow_data(&report.message)))
}

fn escape_workflow_data(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Write the human or JSON report, plus the error annotation when running
/// under GitHub Actions, to `stdout`.
///
/// # Errors
///
/// Returns [`CliError::WriteFailed`] if writing fails.
pub fn write_report(
    report: &Report,
    json: bool,
    annotate: bool,
    stdout: &mut dyn Write,
) -> Result<()> {
    let body = if json {
        format_json(report)
    } else {
        format_human(report)
    };
    writeln!(stdout, "{body}").map_err(|source| CliError::WriteFailed { source })?;
    if let Some(annotation) = error_annotation(report).filter(|_| annotate) {
        writeln!(stdout, "{annotation}").map_err(|source| CliError::WriteFailed { source })?;
    }
    Ok(())
}
