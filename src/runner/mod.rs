//! External execution engine integration
//!
//! Builds the runner invocation, parses its event stream, and hands results
//! to a listener as they arrive.

pub mod cli;
pub mod executor;
pub mod listener;
pub mod stream;

pub use cli::{build_load_test_command, build_run_command, RunOptions};
pub use executor::{run_load_test, run_workflow, RunReport, FAILURE_EXIT_CODE};
pub use listener::{dispatch, ConsoleReporter, ResultListener};
pub use stream::{parse_event, parse_load_test, RunEvent};
