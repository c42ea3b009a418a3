//! Runtime configuration.
//!
//! Stored as a JSON object on disk; every field is optional:
//! ```json
//! {
//!   "analysis": { "input": "journal.csv", "top_n": 5 },
//!   "dashboard": { "seed": 7, "style": { "width": 1600 } }
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analyzers::selectors::ATTENTION_THRESHOLD;
use crate::dashboard::style::DashboardStyle;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "JOURNAL_STATS_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub dashboard: DashboardConfig,
}

/// Inputs and outputs of the `analyze` pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub spreadsheet_output: PathBuf,
    pub report_output: PathBuf,
    pub top_n: usize,
    pub attention_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("journal.csv"),
            spreadsheet_output: PathBuf::from("journal_analysis.xlsx"),
            report_output: PathBuf::from("report.txt"),
            top_n: 5,
            attention_threshold: ATTENTION_THRESHOLD,
        }
    }
}

/// Synthetic data and rendering settings for the `dashboard` command.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub output: PathBuf,
    pub seed: u64,
    pub students: usize,
    pub subjects: Vec<String>,
    pub top_n: usize,
    pub style: DashboardStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dashboard.png"),
            seed: 42,
            students: 25,
            subjects: [
                "Mathematics",
                "Russian",
                "Physics",
                "Computer Science",
                "History",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            top_n: 10,
            style: DashboardStyle::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Uses `explicit` if given, then [`CONFIG_ENV`], else built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::load(Path::new(&path)),
                None => Ok(Self::default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.analysis.input, PathBuf::from("journal.csv"));
        assert_eq!(config.analysis.top_n, 5);
        assert_eq!(config.analysis.attention_threshold, 3.5);
        assert_eq!(config.dashboard.seed, 42);
        assert_eq!(config.dashboard.students, 25);
        assert_eq!(config.dashboard.subjects.len(), 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(
            r#"{"analysis": {"top_n": 3}, "dashboard": {"seed": 7, "style": {"width": 800}}}"#,
        )
        .unwrap();

        assert_eq!(config.analysis.top_n, 3);
        assert_eq!(config.analysis.report_output, PathBuf::from("report.txt"));
        assert_eq!(config.dashboard.seed, 7);
        assert_eq!(config.dashboard.style.width, 800);
        assert_eq!(
            config.dashboard.style.height,
            DashboardStyle::default().height
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(AppConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("journal_stats_missing_config.json");
        let _ = std::fs::remove_file(&path);
        assert!(AppConfig::load(&path).is_err());
    }
}
