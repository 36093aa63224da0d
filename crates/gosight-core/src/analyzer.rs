use std::path::{Path, PathBuf};

use tree_sitter::Tree;

use crate::error::AnalysisError;
use crate::types::{FunctionDeclaration, NestedLiterals, TypeDeclaration};

/// A parsed source file with its tree-sitter AST and original content.
pub struct ParsedFile {
    pub path: PathBuf,
    pub tree: Tree,
    pub content: String,
}

/// Everything a language analyzer pulls out of one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub package: String,
    pub imports: Vec<String>,
    pub types: Vec<TypeDeclaration>,
    pub functions: Vec<FunctionDeclaration>,
}

/// Trait that each language analyzer must implement.
pub trait LanguageAnalyzer: Send + Sync {
    /// Language name (e.g., "go")
    fn language(&self) -> &'static str;

    /// File extensions this analyzer handles (e.g., &["go"])
    fn file_extensions(&self) -> &[&str];

    /// Whether a file name follows the language's test-file convention.
    fn is_test_file(&self, file_name: &str) -> bool;

    /// Parse a source file. Malformed syntax is an error, never recovered from.
    fn parse_file(&self, path: &Path, content: &str) -> Result<ParsedFile, AnalysisError>;

    /// Extract declarations, imports, and per-function metrics from a parsed file.
    fn extract(&self, parsed: &ParsedFile, nested_literals: NestedLiterals) -> Extraction;
}
