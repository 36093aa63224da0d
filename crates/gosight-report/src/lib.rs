pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

use std::path::{Path, PathBuf};

use thiserror::Error;

use gosight_core::config::OutputConfig;
use gosight_core::types::ProjectReport;

/// Failure to produce one artifact.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Markdown, HTML, and JSON.
pub const ARTIFACT_COUNT: usize = 3;

/// Result of writing every artifact. Each artifact is attempted even when
/// an earlier one, or the output directory, failed.
#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub written: Vec<PathBuf>,
    pub errors: Vec<ReportError>,
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of artifacts that were not written.
    pub fn failed(&self) -> usize {
        ARTIFACT_COUNT.saturating_sub(self.written.len())
    }
}

/// Render the Markdown, HTML, and JSON artifacts into the output directory.
pub fn write_reports(report: &ProjectReport, output: &OutputConfig) -> WriteOutcome {
    let mut outcome = WriteOutcome::default();

    if let Err(source) = std::fs::create_dir_all(&output.directory) {
        outcome.errors.push(ReportError::Io {
            path: output.directory.clone(),
            source,
        });
    }

    let artifacts: [(PathBuf, Result<String, ReportError>); ARTIFACT_COUNT] = [
        (output.markdown_path(), Ok(markdown::format_report(report))),
        (output.html_path(), Ok(html::format_report(report))),
        (
            output.json_path(),
            json::format_report(report).map_err(ReportError::from),
        ),
    ];

    for (path, rendered) in artifacts {
        match rendered.and_then(|content| write_file(&path, &content)) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "wrote report");
                outcome.written.push(path);
            }
            Err(e) => outcome.errors.push(e),
        }
    }

    outcome
}

fn write_file(path: &Path, content: &str) -> Result<(), ReportError> {
    std::fs::write(path, content).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
