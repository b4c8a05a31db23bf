//! OpenAPI workflow generation
//!
//! Delegates to an external generator executable and reports where the
//! workflow was written.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use tokio::process::Command as TokioCommand;

use crate::config::GeneratorConfig;

/// Content type used for generated request bodies unless overridden
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Generator switches; every feature is on unless turned off
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateOptions {
    /// OpenAPI document (file path or URL)
    pub spec: String,
    /// Output workflow path
    pub path: PathBuf,
    /// Generate path parameters
    pub path_params: bool,
    /// Generate optional parameters
    pub optional_params: bool,
    /// Generate request bodies
    pub request_body: bool,
    /// Fill values from schema examples
    pub use_example_values: bool,
    /// Fill values from schema defaults
    pub use_default_values: bool,
    /// Emit status checks
    pub check_status: bool,
    /// Emit checks against response examples
    pub check_examples: bool,
    /// Emit JSON schema checks
    pub check_schema: bool,
    /// Request body content type
    pub content_type: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            spec: "openapi.json".to_string(),
            path: PathBuf::from("./workflow.yml"),
            path_params: true,
            optional_params: true,
            request_body: true,
            use_example_values: true,
            use_default_values: true,
            check_status: true,
            check_examples: true,
            check_schema: true,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

/// Build the generator invocation: `<command> <spec> <path> [--no-..].. --content-type <type>`
#[must_use]
pub fn build_generate_command(generator: &GeneratorConfig, options: &GenerateOptions) -> Command {
    let mut cmd = Command::new(&generator.command);
    cmd.arg(&options.spec).arg(&options.path);

    let switches = [
        (options.path_params, "--no-path-params"),
        (options.optional_params, "--no-optional-params"),
        (options.request_body, "--no-request-body"),
        (options.use_example_values, "--no-example-values"),
        (options.use_default_values, "--no-default-values"),
        (options.check_status, "--no-check-status"),
        (options.check_examples, "--no-check-examples"),
        (options.check_schema, "--no-check-schema"),
    ];
    for (enabled, flag) in switches {
        if !enabled {
            cmd.arg(flag);
        }
    }

    cmd.arg("--content-type").arg(&options.content_type);
    cmd
}

/// Run the generator to completion; a non-zero exit is an error.
pub async fn run_generator(cmd: Command) -> Result<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(%program, "spawning workflow generator");

    let status = TokioCommand::from(cmd)
        .stdin(Stdio::null())
        .status()
        .await
        .with_context(|| format!("Failed to spawn workflow generator '{program}'"))?;

    if !status.success() {
        match status.code() {
            Some(code) => bail!("Workflow generator exited with code {code}"),
            None => bail!("Workflow generator was terminated by a signal"),
        }
    }
    Ok(())
}
