use std::collections::{BTreeMap, HashSet};

use crate::graph::PackageGraph;
use crate::types::{FileSummary, PackageMetric, ProjectOverview, ProjectReport};

/// Aggregate per-file summaries into project-wide figures.
///
/// Averages are taken over files, not functions: a file without functions
/// contributes an average complexity of 0.
pub fn compute_overview(files: &[FileSummary]) -> ProjectOverview {
    let mut overview = ProjectOverview::default();
    let mut total_comment_ratio = 0.0f64;
    let mut total_complexity = 0.0f64;
    let mut total_coverage = 0.0f64;
    let mut unique_deps: HashSet<&str> = HashSet::new();
    let mut packages: BTreeMap<String, PackageMetric> = BTreeMap::new();

    for file in files {
        overview.total_files += 1;
        overview.total_lines += file.source.lines;
        overview.total_functions += file.functions.len();
        overview.total_long_functions += file.long_functions.len();
        total_comment_ratio += file.comment_ratio();
        total_complexity += file.avg_complexity;
        total_coverage += file.doc_coverage;

        let metric = packages.entry(file.source.package.clone()).or_default();
        metric.file_count += 1;
        metric.line_count += file.source.lines;
        metric.import_count += file.imports.len();

        unique_deps.extend(file.imports.iter().map(String::as_str));

        if file.is_risky() {
            overview.risky_files += 1;
        }
    }

    let graph = PackageGraph::from_summaries(files);
    tracing::debug!(
        packages = graph.package_count(),
        edges = graph.edge_count(),
        "built package graph"
    );
    for (name, metric) in packages.iter_mut() {
        metric.coupling_count = graph.coupling(name);
    }

    overview.package_count = packages.len();
    overview.dependency_count = unique_deps.len();
    overview.package_metrics = packages;

    if overview.total_files > 0 {
        let n = overview.total_files as f64;
        overview.avg_comment_ratio = total_comment_ratio / n;
        overview.avg_complexity = total_complexity / n;
        overview.godoc_coverage = total_coverage / n;
        overview.project_health = health_score(&overview);
    }

    overview.effort_hours = effort_hours(&overview);
    overview
}

/// Weighted blend of comment ratio, doc coverage, long-function share, and
/// complexity, clamped to [0, 100].
pub fn health_score(overview: &ProjectOverview) -> f64 {
    let long_share =
        overview.total_long_functions as f64 / (overview.total_functions + 1) as f64;
    let health = overview.avg_comment_ratio / 100.0 * 30.0
        + overview.godoc_coverage / 100.0 * 30.0
        + (1.0 - long_share) * 20.0
        + (10.0 - overview.avg_complexity) / 10.0 * 20.0;
    health.clamp(0.0, 100.0)
}

/// Rough refactoring effort in hours. This is an uncalibrated heuristic:
/// half an hour per hundred lines, a fifth of an hour per unit of average
/// complexity per function, and five hours per long function.
pub fn effort_hours(overview: &ProjectOverview) -> f64 {
    overview.total_lines as f64 / 100.0 * 0.5
        + overview.avg_complexity * overview.total_functions as f64 * 0.2
        + overview.total_long_functions as f64 * 5.0
}

/// Sort summaries by path and bundle them with their overview.
pub fn build_report(mut files: Vec<FileSummary>) -> ProjectReport {
    files.sort_by(|a, b| a.source.path.cmp(&b.source.path));
    let overview = compute_overview(&files);
    ProjectReport { overview, files }
}
