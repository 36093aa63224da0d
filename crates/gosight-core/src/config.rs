use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::NestedLiterals;

/// Name of the configuration file looked up in the analyzed tree.
pub const CONFIG_FILE_NAME: &str = ".gosight.toml";

/// Top-level configuration from `.gosight.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Globs matched against paths relative to the analyzed root.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub nested_literals: NestedLiterals,
    /// Worker threads for per-file analysis. `None` uses one per core.
    #[serde(default)]
    pub jobs: Option<usize>,
}

/// Where the three artifacts are written and what they are called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_markdown")]
    pub markdown: String,
    #[serde(default = "default_html")]
    pub html: String,
    #[serde(default = "default_json")]
    pub json: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_markdown() -> String {
    "go_code_summary.md".to_string()
}

fn default_html() -> String {
    "go_code_summary.html".to_string()
}

fn default_json() -> String {
    "go_code_summary.json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            markdown: default_markdown(),
            html: default_html(),
            json: default_json(),
        }
    }
}

impl OutputConfig {
    pub fn markdown_path(&self) -> PathBuf {
        self.directory.join(&self.markdown)
    }

    pub fn html_path(&self) -> PathBuf {
        self.directory.join(&self.html)
    }

    pub fn json_path(&self) -> PathBuf {
        self.directory.join(&self.json)
    }
}

impl Config {
    /// Load configuration from a `.gosight.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse '{}'", path.display()))?;
        Ok(config)
    }

    /// Load from `.gosight.toml` in the given directory or any ancestor, or return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut current = start.as_path();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        config
                    }
                    Err(e) => {
                        tracing::warn!(
                            "failed to load config from '{}': {e:#}. Using defaults.",
                            config_path.display()
                        );
                        Self::default()
                    }
                };
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.project.exclude_patterns.is_empty());
        assert_eq!(config.analysis.nested_literals, NestedLiterals::Inline);
        assert!(config.analysis.jobs.is_none());
        assert_eq!(config.output.markdown, "go_code_summary.md");
        assert_eq!(
            config.output.json_path(),
            PathBuf::from("./go_code_summary.json")
        );
    }

    #[test]
    fn test_deserialize_config() {
        let toml_str = r#"
[project]
exclude_patterns = ["vendor/**", "**/testdata/**"]

[analysis]
nested_literals = "skip"
jobs = 2

[output]
directory = "reports"
html = "index.html"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.project.exclude_patterns,
            vec!["vendor/**", "**/testdata/**"]
        );
        assert_eq!(config.analysis.nested_literals, NestedLiterals::Skip);
        assert_eq!(config.analysis.jobs, Some(2));
        assert_eq!(config.output.html_path(), PathBuf::from("reports/index.html"));
        // Unset file names keep their defaults
        assert_eq!(config.output.markdown, "go_code_summary.md");
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.analysis.nested_literals, NestedLiterals::Inline);
    }

    #[test]
    fn test_unknown_nested_literal_mode_rejected() {
        let toml_str = r#"
[analysis]
nested_literals = "separate"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_load_or_default_finds_ancestor_config() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[analysis]\nnested_literals = \"skip\"\n",
        )
        .unwrap();
        let nested = tmp.path().join("cmd/server");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Config::load_or_default(&nested);
        assert_eq!(config.analysis.nested_literals, NestedLiterals::Skip);
    }

    #[test]
    fn test_load_or_default_falls_back_on_invalid_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "[analysis\n").unwrap();

        let config = Config::load_or_default(tmp.path());
        assert_eq!(config.analysis.nested_literals, NestedLiterals::Inline);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(Config::load(&tmp.path().join("absent.toml")).is_err());
    }
}
