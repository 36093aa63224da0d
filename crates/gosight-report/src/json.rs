use serde::Serialize;

use gosight_core::types::{
    FileSummary, FunctionDeclaration, ProjectOverview, ProjectReport, TypeDeclaration,
};

/// Top-level document: `{ "overview": {...}, "files": [...] }`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub overview: &'a ProjectOverview,
    pub files: Vec<JsonFile<'a>>,
}

/// One analyzed file, flattened with its derived metrics.
#[derive(Debug, Serialize)]
pub struct JsonFile<'a> {
    pub filename: String,
    pub package: &'a str,
    pub types: &'a [TypeDeclaration],
    pub functions: &'a [FunctionDeclaration],
    pub imports: &'a [String],
    pub lines: usize,
    pub comment_lines: usize,
    pub largest_function_lines: usize,
    pub comment_ratio: f64,
    pub long_functions: &'a [FunctionDeclaration],
    pub avg_complexity: f64,
    pub godoc_coverage: f64,
    pub max_function_depth: u32,
    pub maintainability_index: f64,
}

impl<'a> From<&'a FileSummary> for JsonFile<'a> {
    fn from(file: &'a FileSummary) -> Self {
        Self {
            filename: file.source.path.display().to_string(),
            package: &file.source.package,
            types: &file.types,
            functions: &file.functions,
            imports: &file.imports,
            lines: file.source.lines,
            comment_lines: file.source.comment_lines,
            largest_function_lines: file.largest_function_lines(),
            comment_ratio: file.comment_ratio(),
            long_functions: &file.long_functions,
            avg_complexity: file.avg_complexity,
            godoc_coverage: file.doc_coverage,
            max_function_depth: file.max_function_depth,
            maintainability_index: file.maintainability_index,
        }
    }
}

/// Format a full analysis report as pretty-printed JSON.
pub fn format_report(report: &ProjectReport) -> Result<String, serde_json::Error> {
    let doc = JsonReport {
        overview: &report.overview,
        files: report.files.iter().map(JsonFile::from).collect(),
    };
    serde_json::to_string_pretty(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_report;

    fn parse(report: &ProjectReport) -> serde_json::Value {
        let json = format_report(report).unwrap();
        serde_json::from_str(&json).expect("should be valid JSON")
    }

    #[test]
    fn test_top_level_shape() {
        let value = parse(&sample_report());
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object["overview"].is_object());
        assert_eq!(object["files"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_overview_fields() {
        let value = parse(&sample_report());
        let overview = &value["overview"];
        assert_eq!(overview["total_files"], 2);
        assert_eq!(overview["total_functions"], 2);
        assert_eq!(overview["avg_complexity"], 2.0);
        assert_eq!(overview["risky_files"], 1);
        assert_eq!(overview["package_metrics"]["q"]["coupling_count"], 1);
        assert_eq!(overview["package_metrics"]["p"]["coupling_count"], 0);
    }

    #[test]
    fn test_file_keys() {
        let value = parse(&sample_report());
        let file = value["files"][0].as_object().unwrap();
        for key in [
            "filename",
            "package",
            "types",
            "functions",
            "imports",
            "lines",
            "comment_lines",
            "largest_function_lines",
            "comment_ratio",
            "long_functions",
            "avg_complexity",
            "godoc_coverage",
            "max_function_depth",
            "maintainability_index",
        ] {
            assert!(file.contains_key(key), "missing key {key}");
        }
        assert_eq!(file["filename"], "p/a.go");
        assert_eq!(file["package"], "p");
        assert_eq!(file["comment_ratio"], 10.0);
        assert_eq!(file["largest_function_lines"], 9);
    }

    #[test]
    fn test_declarations_serialized() {
        let value = parse(&sample_report());
        let func = &value["files"][0]["functions"][0];
        assert_eq!(func["name"], "Clamp");
        assert_eq!(func["comment"], "Clamp limits v.");
        assert_eq!(func["signature"], "func Clamp(v int) int");
        assert_eq!(func["complexity"], 3);

        let undocumented = &value["files"][1]["functions"][0];
        assert!(undocumented["comment"].is_null());

        let ty = &value["files"][0]["types"][0];
        assert_eq!(ty["name"], "Range");
        assert_eq!(ty["definition"], "type Range struct {\n\tLo int\n\tHi int\n}");
    }

    #[test]
    fn test_empty_report() {
        let value = parse(&ProjectReport::default());
        assert_eq!(value["overview"]["total_files"], 0);
        assert!(value["files"].as_array().unwrap().is_empty());
    }
}
