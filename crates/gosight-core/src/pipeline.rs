use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::aggregate;
use crate::analyzer::LanguageAnalyzer;
use crate::config::Config;
use crate::discovery::{self, ExcludeSet};
use crate::error::AnalysisError;
use crate::metrics;
use crate::types::{FileSummary, NestedLiterals, ProjectReport};

/// Output of one analysis run.
pub struct FullAnalysis {
    pub report: ProjectReport,
    /// Files dropped because they could not be read or parsed.
    pub skipped: Vec<AnalysisError>,
}

/// Discovery, per-file extraction and metrics, then aggregation.
///
/// Per-file work may run on several threads; each worker only produces a
/// `FileSummary` or an error, and aggregation happens afterwards on the
/// calling thread over the path-sorted summaries.
pub struct AnalysisPipeline {
    analyzer: Box<dyn LanguageAnalyzer>,
    config: Config,
    excludes: ExcludeSet,
}

impl AnalysisPipeline {
    pub fn new(analyzer: Box<dyn LanguageAnalyzer>, config: Config) -> Self {
        let excludes = ExcludeSet::new(&config.project.exclude_patterns);
        Self {
            analyzer,
            config,
            excludes,
        }
    }

    /// Run a full analysis on the given project path.
    ///
    /// Only a discovery failure is returned as an error; unreadable or
    /// malformed files are reported in `FullAnalysis::skipped` for the caller
    /// to warn about.
    pub fn analyze(&self, project_path: &Path) -> Result<FullAnalysis, AnalysisError> {
        let files =
            discovery::discover_files(project_path, self.analyzer.as_ref(), &self.excludes)?;
        tracing::info!(
            language = self.analyzer.language(),
            files = files.len(),
            "analyzing {}",
            project_path.display()
        );

        let results = self.analyze_files(&files);

        let mut summaries = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for result in results {
            match result {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    tracing::debug!(path = %e.path().display(), "skipping file: {e}");
                    skipped.push(e);
                }
            }
        }

        Ok(FullAnalysis {
            report: aggregate::build_report(summaries),
            skipped,
        })
    }

    fn analyze_files(&self, files: &[PathBuf]) -> Vec<Result<FileSummary, AnalysisError>> {
        let nested = self.config.analysis.nested_literals;
        let run = || -> Vec<Result<FileSummary, AnalysisError>> {
            files
                .par_iter()
                .map(|path| analyze_file(self.analyzer.as_ref(), path, nested))
                .collect()
        };

        match self.config.analysis.jobs {
            Some(jobs) => match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    tracing::warn!(
                        "failed to build a {jobs}-thread pool ({e}); using the global pool"
                    );
                    run()
                }
            },
            None => run(),
        }
    }
}

/// Read, parse, extract, and measure a single file.
pub fn analyze_file(
    analyzer: &dyn LanguageAnalyzer,
    path: &Path,
    nested_literals: NestedLiterals,
) -> Result<FileSummary, AnalysisError> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = analyzer.parse_file(path, &content)?;
    let extraction = analyzer.extract(&parsed, nested_literals);
    tracing::debug!(
        path = %path.display(),
        package = %extraction.package,
        functions = extraction.functions.len(),
        "analyzed file"
    );
    Ok(metrics::summarize_file(path, &parsed.content, extraction))
}
