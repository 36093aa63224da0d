//! Standalone HTML page.
//!
//! Styling comes from the Tailwind CDN script and the package chart is drawn
//! with Chart.js, so the page needs network access to render as intended.
//! Each file gets a collapsible `<details>` section.

use gosight_core::types::{FileSummary, ProjectOverview, ProjectReport, LONG_FUNCTION_LINES};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Render the report as a standalone HTML page.
pub fn format_report(report: &ProjectReport) -> String {
    let mut html = String::new();

    html.push_str(&render_head());
    html.push_str("<body class=\"bg-gray-100 font-sans\">\n<div class=\"container mx-auto p-4\">\n");
    html.push_str("<h1 class=\"text-3xl font-bold mb-4\">Go Code Summary</h1>\n");
    html.push_str("<h2 class=\"text-2xl font-semibold mb-2\">Project Overview</h2>\n");

    if report.is_empty() {
        html.push_str("<p>No Go files found.</p>\n");
    } else {
        html.push_str(&render_overview(&report.overview));
        html.push_str(&render_package_chart(&report.overview));
        for file in &report.files {
            html.push_str(&render_file(file));
        }
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_head() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Go Code Summary</title>
    <script src="{TAILWIND_CDN}"></script>
    <script src="{CHART_JS_CDN}"></script>
    <style>
        pre {{ background-color: #1f2937; color: #e5e7eb; padding: 1rem; border-radius: 0.5rem; }}
        code {{ font-family: monospace; }}
    </style>
</head>
"#
    )
}

fn render_overview(overview: &ProjectOverview) -> String {
    format!(
        r#"<ul class="list-disc ml-6 mb-4">
    <li>Files Processed: {}</li>
    <li>Total Lines of Code: {}</li>
    <li>Total Functions: {}</li>
    <li>Long Functions (&gt;{LONG_FUNCTION_LINES} lines): {}</li>
    <li>Average Comment-to-Code Ratio: {:.2}%</li>
    <li>Average Function Complexity: {:.2}</li>
    <li>Godoc Coverage: {:.2}%</li>
    <li>Packages: {}</li>
    <li>External Dependencies: {}</li>
    <li>Project Health Score: {:.2}/100</li>
    <li>Risky Files: {}</li>
    <li>Estimated Refactoring Effort: {:.2} hours</li>
</ul>
"#,
        overview.total_files,
        overview.total_lines,
        overview.total_functions,
        overview.total_long_functions,
        overview.avg_comment_ratio,
        overview.avg_complexity,
        overview.godoc_coverage,
        overview.package_count,
        overview.dependency_count,
        overview.project_health,
        overview.risky_files,
        overview.effort_hours,
    )
}

fn render_package_chart(overview: &ProjectOverview) -> String {
    let mut html =
        String::from("<h3 class=\"text-lg font-medium mb-2\">Package Breakdown</h3>\n");
    if overview.package_metrics.is_empty() {
        html.push_str("<p>No packages found.</p>\n");
        return html;
    }

    let labels: Vec<&str> = overview.package_metrics.keys().map(String::as_str).collect();
    let files: Vec<usize> = overview
        .package_metrics
        .values()
        .map(|m| m.file_count)
        .collect();
    let lines: Vec<usize> = overview
        .package_metrics
        .values()
        .map(|m| m.line_count)
        .collect();

    html.push_str(&format!(
        r#"<canvas id="packageChart" class="mb-4"></canvas>
<script>
    new Chart(document.getElementById('packageChart').getContext('2d'), {{
        type: 'bar',
        data: {{
            labels: {},
            datasets: [
                {{ label: 'File Count', data: {}, backgroundColor: '#3b82f6' }},
                {{ label: 'Line Count', data: {}, backgroundColor: '#10b981' }}
            ]
        }},
        options: {{ scales: {{ y: {{ beginAtZero: true }} }} }}
    }});
</script>
"#,
        js_array(&labels),
        js_array(&files),
        js_array(&lines),
    ));
    html
}

fn render_file(file: &FileSummary) -> String {
    let mut html = format!(
        r#"<details class="mb-4 bg-white rounded-lg shadow">
<summary class="p-4 text-xl font-semibold cursor-pointer">{} ({})</summary>
<div class="p-4">
<h3 class="text-lg font-medium">Metrics</h3>
<ul class="list-disc ml-6 mb-4">
    <li>Lines of Code: {}</li>
    <li>Number of Functions: {}</li>
    <li>Largest Function: {} lines</li>
    <li>Long Functions (&gt;{LONG_FUNCTION_LINES} lines): {}</li>
    <li>Comment-to-Code Ratio: {:.2}%</li>
    <li>Average Function Complexity: {:.2}</li>
    <li>Godoc Coverage: {:.2}%</li>
    <li>Max Function Depth: {}</li>
    <li>Maintainability Index: {:.2}</li>
    <li>External Dependencies: {}</li>
</ul>
"#,
        html_escape(&file.source.path.display().to_string()),
        html_escape(&file.source.package),
        file.source.lines,
        file.functions.len(),
        file.largest_function_lines(),
        file.long_functions.len(),
        file.comment_ratio(),
        file.avg_complexity,
        file.doc_coverage,
        file.max_function_depth,
        file.maintainability_index,
        file.imports.len(),
    );

    if !file.types.is_empty() {
        html.push_str("<h3 class=\"text-lg font-medium\">Types</h3>\n");
        for ty in &file.types {
            push_declaration(&mut html, ty.doc.as_deref(), &ty.definition);
        }
    }

    if !file.functions.is_empty() {
        html.push_str("<h3 class=\"text-lg font-medium mt-4\">Functions</h3>\n");
        for func in &file.functions {
            push_declaration(&mut html, func.doc.as_deref(), &func.signature);
        }
    }

    html.push_str("</div>\n</details>\n");
    html
}

fn push_declaration(html: &mut String, doc: Option<&str>, code: &str) {
    if let Some(doc) = doc {
        html.push_str(&format!("<p class=\"mb-2\">{}</p>\n", html_escape(doc)));
    }
    html.push_str(&format!("<pre><code>{}</code></pre>\n", html_escape(code)));
}

/// JSON array literal, which is also a valid JavaScript expression.
fn js_array<T: serde::Serialize>(values: &[T]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_report;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_page_references_cdn_scripts() {
        let html = format_report(&sample_report());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<script src="https://cdn.tailwindcss.com"></script>"#));
        assert!(html.contains(r#"<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>"#));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_package_chart_data() {
        let html = format_report(&sample_report());
        assert!(html.contains("<canvas id=\"packageChart\""));
        assert!(html.contains(r#"labels: ["p","q"]"#));
        assert!(html.contains("label: 'File Count', data: [1,1]"));
        assert!(html.contains("label: 'Line Count', data: [20,30]"));
    }

    #[test]
    fn test_file_details_escaped() {
        let html = format_report(&sample_report());
        assert_eq!(html.matches("<details").count(), 2);
        assert!(html.contains("p/a.go (p)</summary>"));
        assert!(html.contains("<p class=\"mb-2\">Range is &lt;inclusive&gt; &amp; closed.</p>"));
        assert!(html.contains("<pre><code>func Clamp(v int) int</code></pre>"));
        assert!(html.contains("<li>Maintainability Index: 97.70</li>"));
    }

    #[test]
    fn test_empty_report() {
        let html = format_report(&ProjectReport::default());
        assert!(html.contains("<p>No Go files found.</p>"));
        assert!(!html.contains("<canvas"));
        assert!(!html.contains("<details"));
    }
}
