pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use analyzer::{Extraction, LanguageAnalyzer, ParsedFile};
pub use config::Config;
pub use error::AnalysisError;
pub use graph::PackageGraph;
pub use pipeline::{AnalysisPipeline, FullAnalysis};
pub use types::*;
