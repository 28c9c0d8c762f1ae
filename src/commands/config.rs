use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use sqlparser::dialect::{dialect_from_str, Dialect};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "sqlbench.yaml";

/// Benchmark configuration, read from sqlbench.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Base URL of the text-to-SQL service API
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// SQL dialect used to tokenize queries during normalization
    #[serde(default = "default_dialect")]
    pub dialect: String,

    /// Keep DISTINCT modifiers instead of stripping them before execution
    #[serde(default)]
    pub keep_distinct: bool,

    /// Compare failed query executions as empty results
    #[serde(default)]
    pub degrade_on_execution_error: bool,

    /// Fraction of the kept suite sent to the service as context
    #[serde(default = "default_context_percent")]
    pub context_percent: f64,

    /// Fraction of the suite to use at all
    #[serde(default = "default_suite_size")]
    pub suite_size: f64,

    /// Directory the results file is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Root directory of the artifact store
    #[serde(default = "default_artifact_root")]
    pub artifact_root: PathBuf,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_service_url() -> String {
    "http://localhost:80/api/v1/".to_string()
}

fn default_dialect() -> String {
    "generic".to_string()
}

fn default_context_percent() -> f64 {
    0.1
}

fn default_suite_size() -> f64 {
    1.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("test_results")
}

fn default_artifact_root() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_bucket() -> String {
    "k2-benchmark-results".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            dialect: default_dialect(),
            keep_distinct: false,
            degrade_on_execution_error: false,
            context_percent: default_context_percent(),
            suite_size: default_suite_size(),
            output_dir: default_output_dir(),
            artifact_root: default_artifact_root(),
            bucket: default_bucket(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BenchConfig {
    /// Tokenizer dialect named by the configuration
    pub fn sql_dialect(&self) -> Result<Box<dyn Dialect>> {
        resolve_dialect(&self.dialect)
    }
}

/// Look up a sqlparser dialect by name (generic, postgresql, mysql, sqlite, duckdb, ...)
pub fn resolve_dialect(name: &str) -> Result<Box<dyn Dialect>> {
    dialect_from_str(name).ok_or_else(|| anyhow!("Unsupported SQL dialect: {}", name))
}

/// Reads the configuration file from the specified path, or sqlbench.yaml in the current
/// directory. Without an explicit path a missing file means defaults.
pub fn read_config(config_path: Option<PathBuf>) -> Result<BenchConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found at: {}", path.display());
            }
            load_config(&path)
        }
        None => {
            let path = std::env::current_dir()?.join(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_config(&path)
            } else {
                tracing::debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(BenchConfig::default())
            }
        }
    }
}

fn load_config(path: &Path) -> Result<BenchConfig> {
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let config: BenchConfig = serde_yaml::from_str(&config_str)
        .with_context(|| format!("Invalid configuration file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
