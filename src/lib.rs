//! Step CI - API workflow runner front end
//!
//! Drives an external execution engine, renders its streamed test results
//! as colored terminal reports, and wraps workflow generation and setup.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod env;
pub mod generate;
pub mod init;
pub mod logging;
pub mod results;
pub mod runner;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use cli::{should_display_body, RenderOptions};
pub use config::CliConfig;
pub use results::{LoadTestResult, Step, Test, WorkflowResult};
pub use runner::{parse_event, ConsoleReporter, ResultListener, RunEvent, FAILURE_EXIT_CODE};
