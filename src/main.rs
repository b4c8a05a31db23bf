//! Step CI - API workflow runner front end
//!
//! CLI entry point: parses arguments, loads configuration and dispatches
//! to the run, generate and init commands.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use stepci::cli::display::{
    analytics_enabled, render_analytics_message, render_feedback_message, render_init_done,
    render_load_test_notice, render_workflow_written,
};
use stepci::cli::{render_load_test, RenderOptions};
use stepci::config::CliConfig;
use stepci::env::{parse_env_var, parse_secret, to_mapping};
use stepci::generate::{build_generate_command, run_generator, GenerateOptions, DEFAULT_CONTENT_TYPE};
use stepci::init::write_default_workflow;
use stepci::logging::init_logging;
use stepci::runner::{
    build_load_test_command, build_run_command, run_load_test, run_workflow, ConsoleReporter,
    RunOptions, FAILURE_EXIT_CODE,
};

const WELCOME_TEXT: &str = "\
Step CI - automated API testing and quality assurance

Commands:
  stepci init [path]              Create a starter workflow
  stepci run [workflow]           Run a workflow
  stepci generate [spec] [path]   Generate a workflow from an OpenAPI spec

Run `stepci --help` for all options.";

/// Automated API testing and quality assurance
///
/// Runs workflow files through the Step CI engine and renders the results.
#[derive(Parser, Debug)]
#[command(name = "stepci", version, about)]
struct Cli {
    /// Path to a stepci.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run workflow
    Run(RunArgs),
    /// Generate workflow from OpenAPI spec
    Generate(GenerateArgs),
    /// Init a Step CI workflow
    Init {
        /// Workflow file path
        #[arg(default_value = "workflow.yml")]
        path: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Workflow file path
    #[arg(default_value = "workflow.yml")]
    workflow: PathBuf,

    /// Env variables to use (`name=value`)
    #[arg(short = 'e', long = "env", value_parser = parse_env_var)]
    env: Vec<(String, String)>,

    /// Secret variables to use (`name=value`)
    #[arg(short = 's', long = "secret", value_parser = parse_secret)]
    secret: Vec<(String, String)>,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Run workflow in load-testing mode
    #[arg(long, visible_alias = "load")]
    loadtest: bool,

    /// Number of concurrent executions
    #[arg(long)]
    concurrency: Option<u32>,
}

#[derive(clap::Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
struct GenerateArgs {
    /// OpenAPI file or URL
    #[arg(default_value = "openapi.json")]
    spec: String,

    /// Output file path
    #[arg(default_value = "./workflow.yml")]
    path: PathBuf,

    /// Do not generate path parameters
    #[arg(long)]
    no_path_params: bool,

    /// Do not generate optional parameters
    #[arg(long)]
    no_optional_params: bool,

    /// Do not generate request bodies
    #[arg(long)]
    no_request_body: bool,

    /// Do not use example values
    #[arg(long)]
    no_example_values: bool,

    /// Do not use default values
    #[arg(long)]
    no_default_values: bool,

    /// Do not check response status
    #[arg(long)]
    no_check_status: bool,

    /// Do not check against response examples
    #[arg(long)]
    no_check_examples: bool,

    /// Do not check against response schemas
    #[arg(long)]
    no_check_schema: bool,

    /// Request body content type
    #[arg(long, default_value = DEFAULT_CONTENT_TYPE)]
    content_type: String,
}

impl From<GenerateArgs> for GenerateOptions {
    fn from(args: GenerateArgs) -> Self {
        Self {
            spec: args.spec,
            path: args.path,
            path_params: !args.no_path_params,
            optional_params: !args.no_optional_params,
            request_body: !args.no_request_body,
            use_example_values: !args.no_example_values,
            use_default_values: !args.no_default_values,
            check_status: !args.no_check_status,
            check_examples: !args.no_check_examples,
            check_schema: !args.no_check_schema,
            content_type: args.content_type,
        }
    }
}

/// Run a workflow (streamed or load test). Returns the process exit code.
async fn run(args: RunArgs, config: &CliConfig) -> Result<i32> {
    let options = RunOptions {
        workflow: args.workflow,
        env: to_mapping(args.env),
        secrets: to_mapping(args.secret),
        concurrency: args.concurrency,
    };
    let render = RenderOptions {
        verbose: args.verbose || config.output.verbose,
    };
    let mut stdout = io::stdout();

    if args.loadtest {
        render_load_test_notice(&mut stdout)?;
        let result = run_load_test(build_load_test_command(&config.runner, &options))
            .await
            .with_context(|| format!("Failed to load test '{}'", options.workflow.display()))?;
        render_load_test(&mut stdout, &result)?;
        render_feedback_message(&mut stdout)?;
        return Ok(if result.passed { 0 } else { FAILURE_EXIT_CODE });
    }

    let mut reporter = ConsoleReporter::new(stdout, render);
    let report = run_workflow(build_run_command(&config.runner, &options), &mut reporter)
        .await
        .with_context(|| format!("Failed to run workflow '{}'", options.workflow.display()))?;
    tracing::debug!(tests = report.tests, passed = report.passed, "workflow finished");
    Ok(report.process_exit_code())
}

async fn generate(args: GenerateArgs, config: &CliConfig) -> Result<()> {
    let options = GenerateOptions::from(args);
    run_generator(build_generate_command(&config.generator, &options))
        .await
        .with_context(|| format!("Failed to generate workflow from '{}'", options.spec))?;

    let mut stdout = io::stdout();
    render_workflow_written(&mut stdout, &options.path)?;
    render_feedback_message(&mut stdout)?;
    Ok(())
}

fn init(path: &Path) -> Result<()> {
    write_default_workflow(path)?;
    render_init_done(&mut io::stdout(), path)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut stdout = io::stdout();
    render_analytics_message(&mut stdout, analytics_enabled())?;

    let Some(command) = cli.command else {
        writeln!(stdout, "{WELCOME_TEXT}")?;
        return Ok(());
    };

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let exit_code = match command {
        Commands::Run(args) => run(args, &config).await?,
        Commands::Generate(args) => {
            generate(args, &config).await?;
            0
        }
        Commands::Init { path } => {
            init(&path)?;
            0
        }
    };

    if exit_code != 0 {
        io::stdout().flush()?;
        std::process::exit(exit_code);
    }
    Ok(())
}
