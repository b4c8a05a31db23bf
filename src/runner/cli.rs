//! Workflow runner command builder
//!
//! Constructs `std::process::Command` for invoking the external execution
//! engine in workflow or load-test mode.

use std::path::PathBuf;
use std::process::Command;

use crate::config::RunnerConfig;

/// What to run and with which variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Workflow file to execute
    pub workflow: PathBuf,
    /// `env` variables as key/value pairs
    pub env: Vec<(String, String)>,
    /// `secrets` variables as key/value pairs
    pub secrets: Vec<(String, String)>,
    /// Maximum number of tests executed concurrently
    pub concurrency: Option<u32>,
}

/// Build a `Command` that runs a workflow and streams result events.
#[must_use]
pub fn build_run_command(runner: &RunnerConfig, options: &RunOptions) -> Command {
    let mut cmd = base_command(runner, "run", options);
    if let Some(concurrency) = options.concurrency {
        cmd.arg("--concurrency").arg(concurrency.to_string());
    }
    cmd
}

/// Build a `Command` that load-tests a workflow and prints one result.
#[must_use]
pub fn build_load_test_command(runner: &RunnerConfig, options: &RunOptions) -> Command {
    base_command(runner, "loadtest", options)
}

fn base_command(runner: &RunnerConfig, mode: &str, options: &RunOptions) -> Command {
    let mut cmd = Command::new(&runner.command);
    cmd.args(&runner.args);
    cmd.arg(mode).arg(&options.workflow);

    for (key, value) in &options.env {
        cmd.arg("--env").arg(format!("{key}={value}"));
    }
    for (key, value) in &options.secrets {
        cmd.arg("--secret").arg(format!("{key}={value}"));
    }
    cmd
}
