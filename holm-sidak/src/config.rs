//! Configuration loading for holm-sidak.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{Context, Result};
use clap::ValueEnum;
use holm_sidak_core::{ProcedureOptions, Tail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for holm-sidak.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the comparison procedure.
    pub procedure: ProcedureConfig,
    /// Settings for rendering results.
    pub output: OutputConfig,
}

/// Configuration for the Holm-Sidak procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureConfig {
    /// Familywise significance level.
    pub alpha: f64,
    /// Tail of the t-distribution; accepts the same spellings as `--tail`.
    pub tail: Tail,
    /// Compare the first group against every other group instead of all pairs.
    pub control: bool,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned tables for reading in a terminal.
    #[default]
    Terminal,
    /// The full result as a JSON document.
    Json,
}

/// Configuration for output rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Whether terminal output is colored.
    pub colors: bool,
}

impl Default for ProcedureConfig {
    fn default() -> Self {
        let options = ProcedureOptions::default();
        Self {
            alpha: options.alpha,
            tail: options.tail,
            control: options.control,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Terminal,
            colors: true,
        }
    }
}

impl From<ProcedureOptions> for ProcedureConfig {
    fn from(options: ProcedureOptions) -> Self {
        Self {
            alpha: options.alpha,
            tail: options.tail,
            control: options.control,
        }
    }
}

impl ProcedureConfig {
    /// The options handed to the procedure.
    pub fn options(&self) -> ProcedureOptions {
        ProcedureOptions {
            alpha: self.alpha,
            tail: self.tail,
            control: self.control,
        }
    }
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".holm-sidak.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `.holm-sidak.toml` in the current directory,
    /// or use defaults if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from the specified path, or try the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the specified file cannot be read or parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_or_default(),
        }
    }
}
