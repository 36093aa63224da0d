use colored::Colorize;

use gosight_core::types::ProjectReport;

/// Risky files listed by name before the rest are summarized as a count.
const MAX_LISTED_RISKY: usize = 10;

/// Format the project overview for terminal output.
pub fn format_summary(report: &ProjectReport) -> String {
    let overview = &report.overview;
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "gosight - Go Code Summary".bold()));
    out.push_str(&format!("{}\n\n", "=".repeat(40)));

    let health_str = format!("{:.1}", overview.project_health);
    let health_color = if overview.project_health >= 80.0 {
        health_str.green()
    } else if overview.project_health >= 50.0 {
        health_str.yellow()
    } else {
        health_str.red()
    };
    out.push_str(&format!("{}: {}/100\n", "Project Health".bold(), health_color));

    out.push_str(&format!(
        "  Files: {}  Lines: {}  Functions: {}  Packages: {}\n",
        overview.total_files,
        overview.total_lines,
        overview.total_functions,
        overview.package_count
    ));
    out.push_str(&format!(
        "  Avg complexity:   {:.2}\n",
        overview.avg_complexity
    ));
    out.push_str(&format!(
        "  Godoc coverage:   {:.2}%\n",
        overview.godoc_coverage
    ));
    out.push_str(&format!(
        "  Comment ratio:    {:.2}%\n",
        overview.avg_comment_ratio
    ));
    out.push_str(&format!(
        "  Long functions:   {}\n",
        overview.total_long_functions
    ));
    out.push_str(&format!(
        "  Refactor effort:  {:.1} hours\n",
        overview.effort_hours
    ));

    let risky: Vec<_> = report.files.iter().filter(|f| f.is_risky()).collect();
    if risky.is_empty() {
        out.push_str(&format!("\n{}\n", "No risky files found!".green().bold()));
    } else {
        out.push_str(&format!(
            "\n{} ({} found)\n{}\n",
            "Risky files".yellow().bold(),
            risky.len(),
            "-".repeat(40),
        ));
        for file in risky.iter().take(MAX_LISTED_RISKY) {
            out.push_str(&format!(
                "  {} (complexity {:.1}, godoc {:.0}%, {} long)\n",
                file.source.path.display(),
                file.avg_complexity,
                file.doc_coverage,
                file.long_functions.len()
            ));
        }
        if risky.len() > MAX_LISTED_RISKY {
            out.push_str(&format!(
                "  ... and {} more\n",
                risky.len() - MAX_LISTED_RISKY
            ));
        }
    }

    out.push('\n');
    out
}
