use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::analyzer::LanguageAnalyzer;
use crate::error::AnalysisError;

/// Compiled exclude globs, matched against root-relative paths.
pub struct ExcludeSet {
    globs: GlobSet,
}

impl ExcludeSet {
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!("ignoring invalid exclude pattern '{pattern}': {e}"),
            }
        }
        let globs = builder.build().unwrap_or_else(|e| {
            tracing::warn!("failed to compile exclude patterns: {e}");
            GlobSet::empty()
        });
        Self { globs }
    }

    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        let normalized = rel_path.to_string_lossy().replace('\\', "/");
        self.globs.is_match(normalized.as_str())
    }
}

impl Default for ExcludeSet {
    fn default() -> Self {
        Self {
            globs: GlobSet::empty(),
        }
    }
}

/// Recursively collect the source files `analyzer` handles under `root`,
/// leaving out test files and excluded paths.
///
/// Any traversal failure aborts discovery.
pub fn discover_files(
    root: &Path,
    analyzer: &dyn LanguageAnalyzer,
    excludes: &ExcludeSet,
) -> Result<Vec<PathBuf>, AnalysisError> {
    let extensions = analyzer.file_extensions();
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| AnalysisError::Discovery {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let matches_ext = path
            .extension()
            .is_some_and(|ext| extensions.iter().any(|e| ext == *e));
        if !matches_ext {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if analyzer.is_test_file(&file_name) {
            continue;
        }

        let rel_path = path.strip_prefix(root).unwrap_or(path);
        if excludes.is_excluded(rel_path) {
            tracing::debug!(path = %path.display(), "excluded by pattern");
            continue;
        }

        files.push(entry.into_path());
    }

    tracing::debug!(count = files.len(), root = %root.display(), "discovered source files");
    Ok(files)
}
