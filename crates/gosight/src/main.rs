use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use gosight_core::config::Config;
use gosight_core::pipeline::AnalysisPipeline;
use gosight_core::types::NestedLiterals;

use gosight_go::GoAnalyzer;
use gosight_report::text;

#[derive(Parser)]
#[command(name = "gosight")]
#[command(about = "Summarize structure, complexity, and documentation of a Go codebase")]
#[command(version)]
struct Cli {
    /// Path to the project root
    #[arg(default_value = ".")]
    path: PathBuf,
    /// Config file path (defaults to .gosight.toml in the project root or an ancestor)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory the reports are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// How nested function literals are measured: inline or skip
    #[arg(long)]
    nested_literals: Option<NestedLiterals>,
    /// Worker threads for per-file analysis
    #[arg(short, long)]
    jobs: Option<usize>,
    /// Do not print the terminal summary
    #[arg(short, long)]
    quiet: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let output = config.output.clone();

    let analyzer = GoAnalyzer::new().context("failed to initialize Go analyzer")?;
    let pipeline = AnalysisPipeline::new(Box::new(analyzer), config);
    let analysis = pipeline
        .analyze(&cli.path)
        .with_context(|| format!("failed to analyze {}", cli.path.display()))?;

    tracing::info!(
        files = analysis.report.files.len(),
        skipped = analysis.skipped.len(),
        "analysis complete"
    );
    // Printed directly so RUST_LOG cannot hide them.
    for e in &analysis.skipped {
        eprintln!("{} skipping file: {e}", "Warning:".yellow().bold());
    }

    let report = analysis.report;
    if report.is_empty() {
        println!("No Go files found.");
        return Ok(());
    }

    let outcome = gosight_report::write_reports(&report, &output);
    if !outcome.is_success() {
        for e in &outcome.errors {
            eprintln!("{} {e}", "Error:".red().bold());
        }
        anyhow::bail!(
            "{} of {} reports could not be generated",
            outcome.failed(),
            gosight_report::ARTIFACT_COUNT
        );
    }

    if !cli.quiet {
        print!("{}", text::format_summary(&report));
    }
    let names: Vec<String> = outcome
        .written
        .iter()
        .map(|p| display_name(p).display().to_string())
        .collect();
    println!("Generated {}", join_names(&names));
    Ok(())
}

/// Explicit `--config` must load; otherwise search from the project root.
/// Command-line flags override file values.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&cli.path),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(mode) = cli.nested_literals {
        config.analysis.nested_literals = mode;
    }
    if let Some(jobs) = cli.jobs {
        config.analysis.jobs = Some(jobs);
    }
    Ok(config)
}

/// Paths under the current directory are shown without the `./` prefix.
fn display_name(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

/// `a`, `a and b`, `a, b, and c`
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
