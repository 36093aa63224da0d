//! File-level metrics: line counting, documentation coverage, and the
//! maintainability index.
//!
//! Per-function complexity and depth come from the language analyzer, which
//! owns the syntax tree; everything here works on plain numbers and the
//! extracted declarations.

use std::path::Path;

use crate::analyzer::Extraction;
use crate::types::{FileSummary, FunctionDeclaration, SourceFile, TypeDeclaration};

/// Total and comment line counts for a file's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCounts {
    pub lines: usize,
    pub comment_lines: usize,
}

/// Split on `\n` and count lines whose trimmed text opens with `//` or `/*`.
///
/// Continuation lines inside a block comment are not comment lines unless
/// they start with a marker themselves. A trailing newline produces one
/// final empty line, and empty input is a single line.
pub fn count_lines(content: &str) -> LineCounts {
    let mut counts = LineCounts {
        lines: 0,
        comment_lines: 0,
    };
    for line in content.split('\n') {
        counts.lines += 1;
        let trimmed = line.trim();
        if trimmed.starts_with("//") || trimmed.starts_with("/*") {
            counts.comment_lines += 1;
        }
    }
    counts
}

/// `100 - (lines/100 + avg_complexity*2 - comment_ratio*50)`, clamped to [0, 100].
pub fn maintainability_index(lines: usize, comment_lines: usize, avg_complexity: f64) -> f64 {
    if lines == 0 {
        return 100.0;
    }
    let comment_ratio = comment_lines as f64 / lines as f64;
    let idx = 100.0 - (lines as f64 / 100.0 + avg_complexity * 2.0 - comment_ratio * 50.0);
    idx.clamp(0.0, 100.0)
}

/// Mean complexity of the given functions, 0 when there are none.
pub fn average_complexity(functions: &[FunctionDeclaration]) -> f64 {
    if functions.is_empty() {
        return 0.0;
    }
    let total: u64 = functions.iter().map(|f| u64::from(f.complexity)).sum();
    total as f64 / functions.len() as f64
}

/// Percentage of exported types and functions that carry documentation.
/// Files without exported declarations have 0 coverage.
pub fn doc_coverage(types: &[TypeDeclaration], functions: &[FunctionDeclaration]) -> f64 {
    let exported_types = types.iter().filter(|t| t.exported);
    let exported_funcs = functions.iter().filter(|f| f.exported);

    let mut exported = 0usize;
    let mut documented = 0usize;
    for t in exported_types {
        exported += 1;
        if t.is_documented() {
            documented += 1;
        }
    }
    for f in exported_funcs {
        exported += 1;
        if f.is_documented() {
            documented += 1;
        }
    }

    if exported == 0 {
        return 0.0;
    }
    documented as f64 / exported as f64 * 100.0
}

/// Build the summary for one file from its raw text and extracted declarations.
pub fn summarize_file(path: &Path, content: &str, extraction: Extraction) -> FileSummary {
    let counts = count_lines(content);
    let Extraction {
        package,
        imports,
        types,
        functions,
    } = extraction;

    let avg_complexity = average_complexity(&functions);
    let doc_coverage = doc_coverage(&types, &functions);
    let max_function_depth = functions.iter().map(|f| f.max_depth).max().unwrap_or(0);
    let long_functions: Vec<FunctionDeclaration> =
        functions.iter().filter(|f| f.is_long()).cloned().collect();
    let maintainability_index =
        maintainability_index(counts.lines, counts.comment_lines, avg_complexity);

    FileSummary {
        source: SourceFile {
            path: path.to_path_buf(),
            package,
            lines: counts.lines,
            comment_lines: counts.comment_lines,
        },
        imports,
        types,
        functions,
        long_functions,
        avg_complexity,
        doc_coverage,
        max_function_depth,
        maintainability_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(name: &str, doc: bool, complexity: u32, lines: usize) -> FunctionDeclaration {
        FunctionDeclaration {
            name: name.to_string(),
            doc: doc.then(|| format!("{name} does things.")),
            exported: name.starts_with(char::is_uppercase),
            is_method: false,
            signature: format!("func {name}()"),
            start_line: 1,
            end_line: lines,
            complexity,
            max_depth: complexity - 1,
        }
    }

    fn ty(name: &str, doc: bool) -> TypeDeclaration {
        TypeDeclaration {
            name: name.to_string(),
            doc: doc.then(|| format!("{name} is a type.")),
            exported: name.starts_with(char::is_uppercase),
            definition: format!("type {name} struct {{\n}}"),
        }
    }

    #[test]
    fn test_count_lines_naive_comment_detection() {
        let src = "package a\n\n// doc\n/* block\n   continues\n*/\nfunc f() {} // trailing\n";
        let counts = count_lines(src);
        // Trailing newline yields a final empty line.
        assert_eq!(counts.lines, 8);
        // "// doc" and "/* block" only; the continuation and the closing line do not count.
        assert_eq!(counts.comment_lines, 2);
    }

    #[test]
    fn test_count_lines_indented_comment() {
        let counts = count_lines("func f() {\n\t// inside\n}");
        assert_eq!(counts.lines, 3);
        assert_eq!(counts.comment_lines, 1);
    }

    #[test]
    fn test_count_lines_empty_content_is_one_line() {
        assert_eq!(
            count_lines(""),
            LineCounts {
                lines: 1,
                comment_lines: 0
            }
        );
    }

    #[test]
    fn test_maintainability_zero_lines_is_100() {
        assert_eq!(maintainability_index(0, 0, 25.0), 100.0);
    }

    #[test]
    fn test_maintainability_formula() {
        // 100 - (200/100 + 3*2 - 0.25*50) = 100 - (2 + 6 - 12.5) = 104.5 -> clamped
        assert_eq!(maintainability_index(200, 50, 3.0), 100.0);
        // 100 - (1000/100 + 4*2 - 0.1*50) = 100 - (10 + 8 - 5) = 87
        assert!((maintainability_index(1000, 100, 4.0) - 87.0).abs() < 1e-9);
    }

    #[test]
    fn test_maintainability_clamped_at_zero() {
        assert_eq!(maintainability_index(20_000, 0, 10.0), 0.0);
    }

    #[test]
    fn test_average_complexity() {
        assert_eq!(average_complexity(&[]), 0.0);
        let funcs = vec![func("A", true, 3, 5), func("b", false, 1, 5)];
        assert!((average_complexity(&funcs) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_doc_coverage_without_exports_is_zero() {
        let types = vec![ty("internal", true)];
        let funcs = vec![func("helper", true, 1, 3)];
        assert_eq!(doc_coverage(&types, &funcs), 0.0);
        assert_eq!(doc_coverage(&[], &[]), 0.0);
    }

    #[test]
    fn test_doc_coverage_counts_types_and_functions() {
        let types = vec![ty("User", true), ty("Order", false), ty("cache", false)];
        let funcs = vec![func("Run", true, 1, 3), func("Stop", false, 1, 3)];
        // 2 documented out of 4 exported; unexported cache is ignored.
        assert!((doc_coverage(&types, &funcs) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_file_derives_metrics() {
        let mut content = String::from("package shop\n// Checkout runs.\n");
        for _ in 0..58 {
            content.push_str("x\n");
        }
        let extraction = Extraction {
            package: "shop".to_string(),
            imports: vec!["fmt".to_string()],
            types: vec![ty("Cart", true)],
            functions: vec![func("Checkout", true, 5, 51), func("total", false, 1, 50)],
        };

        let summary = summarize_file(Path::new("shop/cart.go"), &content, extraction);
        assert_eq!(summary.source.package, "shop");
        assert_eq!(summary.source.lines, 61);
        assert_eq!(summary.source.comment_lines, 1);
        assert!((summary.avg_complexity - 3.0).abs() < f64::EPSILON);
        assert_eq!(summary.doc_coverage, 100.0);
        assert_eq!(summary.max_function_depth, 4);
        assert_eq!(summary.long_functions.len(), 1);
        assert_eq!(summary.long_functions[0].name, "Checkout");
        assert!(summary.maintainability_index >= 0.0 && summary.maintainability_index <= 100.0);
    }

    #[test]
    fn test_summarize_file_without_functions() {
        let summary = summarize_file(Path::new("doc.go"), "package a\n", Extraction::default());
        assert_eq!(summary.avg_complexity, 0.0);
        assert_eq!(summary.max_function_depth, 0);
        assert!(summary.long_functions.is_empty());
        assert_eq!(summary.doc_coverage, 0.0);
    }
}
