use gosight_core::types::{FileSummary, ProjectOverview, ProjectReport, LONG_FUNCTION_LINES};

/// Format a full analysis report as Markdown.
pub fn format_report(report: &ProjectReport) -> String {
    let mut out = String::new();

    out.push_str("# Go Code Summary\n\n");
    out.push_str("## Project Overview\n\n");

    if report.is_empty() {
        out.push_str("No Go files found.\n");
        return out;
    }

    out.push_str(&format_overview(&report.overview));

    for file in &report.files {
        out.push_str(&format_file(file));
    }

    out
}

fn format_overview(overview: &ProjectOverview) -> String {
    let mut out = String::new();

    out.push_str(&format!("- **Files Processed:** {}\n", overview.total_files));
    out.push_str(&format!("- **Total Lines of Code:** {}\n", overview.total_lines));
    out.push_str(&format!("- **Total Functions:** {}\n", overview.total_functions));
    out.push_str(&format!(
        "- **Long Functions (>{LONG_FUNCTION_LINES} lines):** {}\n",
        overview.total_long_functions
    ));
    out.push_str(&format!(
        "- **Average Comment-to-Code Ratio:** {:.2}%\n",
        overview.avg_comment_ratio
    ));
    out.push_str(&format!(
        "- **Average Function Complexity:** {:.2}\n",
        overview.avg_complexity
    ));
    out.push_str(&format!("- **Godoc Coverage:** {:.2}%\n", overview.godoc_coverage));
    out.push_str(&format!("- **Packages:** {}\n", overview.package_count));
    out.push_str(&format!(
        "- **External Dependencies:** {}\n",
        overview.dependency_count
    ));
    out.push_str(&format!(
        "- **Project Health Score:** {:.2}/100\n",
        overview.project_health
    ));
    out.push_str(&format!("- **Risky Files:** {}\n", overview.risky_files));
    out.push_str(&format!(
        "- **Estimated Refactoring Effort:** {:.2} hours\n",
        overview.effort_hours
    ));

    out.push_str("\n### Package Breakdown\n\n");
    if overview.package_metrics.is_empty() {
        out.push_str("No packages found.\n\n");
        return out;
    }

    out.push_str("| Package | Files | Lines | Imports | Coupling |\n");
    out.push_str("|---------|-------|-------|---------|----------|\n");
    for (name, metric) in &overview.package_metrics {
        out.push_str(&format!(
            "| {name} | {} | {} | {} | {} |\n",
            metric.file_count, metric.line_count, metric.import_count, metric.coupling_count
        ));
    }
    out.push('\n');
    out
}

fn format_file(file: &FileSummary) -> String {
    let mut out = format!(
        "## {} ({})\n\n",
        file.source.path.display(),
        file.source.package
    );

    out.push_str("**Metrics**\n\n");
    out.push_str(&format!("- Lines of Code: {}\n", file.source.lines));
    out.push_str(&format!("- Number of Functions: {}\n", file.functions.len()));
    out.push_str(&format!(
        "- Largest Function: {} lines\n",
        file.largest_function_lines()
    ));
    out.push_str(&format!(
        "- Long Functions (>{LONG_FUNCTION_LINES} lines): {}\n",
        file.long_functions.len()
    ));
    out.push_str(&format!(
        "- Comment-to-Code Ratio: {:.2}%\n",
        file.comment_ratio()
    ));
    out.push_str(&format!(
        "- Average Function Complexity: {:.2}\n",
        file.avg_complexity
    ));
    out.push_str(&format!("- Godoc Coverage: {:.2}%\n", file.doc_coverage));
    out.push_str(&format!("- Max Function Depth: {}\n", file.max_function_depth));
    out.push_str(&format!(
        "- Maintainability Index: {:.2}\n",
        file.maintainability_index
    ));
    out.push_str(&format!("- External Dependencies: {}\n\n", file.imports.len()));

    if !file.types.is_empty() {
        out.push_str("### Types\n\n");
        for ty in &file.types {
            push_declaration(&mut out, ty.doc.as_deref(), &ty.definition);
        }
    }

    if !file.functions.is_empty() {
        out.push_str("### Functions\n\n");
        for func in &file.functions {
            push_declaration(&mut out, func.doc.as_deref(), &func.signature);
        }
    }

    out
}

fn push_declaration(out: &mut String, doc: Option<&str>, code: &str) {
    if let Some(doc) = doc {
        out.push_str(doc);
        out.push_str("\n\n");
    }
    out.push_str(&format!("```go\n{code}\n```\n\n"));
}
