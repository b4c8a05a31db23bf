//! Front-end configuration
//!
//! Parses an optional `stepci.toml` that points the CLI at its external
//! runner and generator and sets output defaults.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "stepci.toml";

/// How to invoke the workflow execution engine
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Executable name or path
    #[serde(default = "default_runner_command")]
    pub command: String,
    /// Arguments placed before the mode (`run`/`loadtest`)
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_runner_command() -> String {
    "stepci-runner".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: default_runner_command(),
            args: Vec::new(),
        }
    }
}

/// How to invoke the OpenAPI workflow generator
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Executable name or path
    #[serde(default = "default_generator_command")]
    pub command: String,
}

fn default_generator_command() -> String {
    "stepci-generate".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: default_generator_command(),
        }
    }
}

/// Output defaults
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Show full step detail for every test
    #[serde(default)]
    pub verbose: bool,
}

/// Top-level configuration parsed from stepci.toml
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    /// Execution engine
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Workflow generator
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Parse a config file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse stepci.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config file, or `stepci.toml` if it exists, or defaults.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            tracing::debug!(path = %default.display(), "loading config");
            Self::from_path(default)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.runner.command.trim().is_empty() {
            bail!("runner.command cannot be empty");
        }
        if self.generator.command.trim().is_empty() {
            bail!("generator.command cannot be empty");
        }
        Ok(())
    }
}
