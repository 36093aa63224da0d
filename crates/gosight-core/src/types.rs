use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A function longer than this many lines is reported as long.
pub const LONG_FUNCTION_LINES: usize = 50;

/// Average complexity above which a file is considered risky.
pub const RISKY_AVG_COMPLEXITY: f64 = 5.0;

/// Documentation coverage (percent) below which a file is considered risky.
pub const RISKY_DOC_COVERAGE: f64 = 50.0;

/// More long functions than this makes a file risky.
pub const RISKY_LONG_FUNCTIONS: usize = 3;

/// A Go source file as read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub package: String,
    pub lines: usize,
    pub comment_lines: usize,
}

/// A struct or interface type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(rename = "comment")]
    pub doc: Option<String>,
    pub exported: bool,
    /// Normalized shape, e.g. `type User struct {\n\tID string\n}`.
    pub definition: String,
}

impl TypeDeclaration {
    pub fn is_documented(&self) -> bool {
        self.doc.is_some()
    }
}

/// A function or method declaration with its per-function metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(rename = "comment")]
    pub doc: Option<String>,
    pub exported: bool,
    pub is_method: bool,
    pub signature: String,
    /// 1-based, inclusive.
    pub start_line: usize,
    /// 1-based, inclusive.
    pub end_line: usize,
    pub complexity: u32,
    pub max_depth: u32,
}

impl FunctionDeclaration {
    /// Number of lines spanned by the declaration, both ends included.
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    pub fn is_long(&self) -> bool {
        self.line_count() > LONG_FUNCTION_LINES
    }

    pub fn is_documented(&self) -> bool {
        self.doc.is_some()
    }
}

/// How bodies of function literals nested inside a function are measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedLiterals {
    /// Literal bodies count toward the enclosing function's complexity and depth.
    #[default]
    Inline,
    /// Literal bodies are left out of the enclosing function's measurement.
    Skip,
}

impl fmt::Display for NestedLiterals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestedLiterals::Inline => write!(f, "inline"),
            NestedLiterals::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for NestedLiterals {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(NestedLiterals::Inline),
            "skip" => Ok(NestedLiterals::Skip),
            _ => Err(anyhow::anyhow!("unknown nested literal mode: {s}")),
        }
    }
}

/// Per-file metrics derived from a source file and its declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub source: SourceFile,
    pub imports: Vec<String>,
    pub types: Vec<TypeDeclaration>,
    pub functions: Vec<FunctionDeclaration>,
    pub long_functions: Vec<FunctionDeclaration>,
    pub avg_complexity: f64,
    pub doc_coverage: f64,
    pub max_function_depth: u32,
    pub maintainability_index: f64,
}

impl FileSummary {
    /// Comment lines as a percentage of all lines; 0 for an empty file.
    pub fn comment_ratio(&self) -> f64 {
        if self.source.lines == 0 {
            return 0.0;
        }
        self.source.comment_lines as f64 / self.source.lines as f64 * 100.0
    }

    pub fn largest_function_lines(&self) -> usize {
        self.functions
            .iter()
            .map(FunctionDeclaration::line_count)
            .max()
            .unwrap_or(0)
    }

    pub fn is_risky(&self) -> bool {
        self.avg_complexity > RISKY_AVG_COMPLEXITY
            || self.doc_coverage < RISKY_DOC_COVERAGE
            || self.long_functions.len() > RISKY_LONG_FUNCTIONS
    }
}

/// Size and coupling figures for one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetric {
    pub file_count: usize,
    pub line_count: usize,
    pub import_count: usize,
    pub coupling_count: usize,
}

/// Project-wide aggregate over every analyzed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_functions: usize,
    pub total_long_functions: usize,
    pub avg_comment_ratio: f64,
    pub avg_complexity: f64,
    pub godoc_coverage: f64,
    pub package_count: usize,
    pub dependency_count: usize,
    pub project_health: f64,
    pub risky_files: usize,
    pub effort_hours: f64,
    pub package_metrics: BTreeMap<String, PackageMetric>,
}

/// The canonical model every renderer consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectReport {
    pub overview: ProjectOverview,
    /// Sorted by file path.
    pub files: Vec<FileSummary>,
}

impl ProjectReport {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
