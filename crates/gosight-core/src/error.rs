use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while discovering, reading, or parsing source files.
///
/// `Discovery` aborts the run. `Read` and `Parse` only drop the file they
/// name from the analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to traverse {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl AnalysisError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            AnalysisError::Discovery { path, .. }
            | AnalysisError::Read { path, .. }
            | AnalysisError::Parse { path, .. } => path,
        }
    }
}
