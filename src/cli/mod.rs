//! CLI output formatting
//!
//! Renders step, test, workflow and load-test results as colored,
//! syntax-highlighted terminal text. Every renderer writes to a caller
//! supplied `Write`; the binary passes stdout.

pub mod checks;
pub mod content;
pub mod display;
pub mod exchange;
pub mod highlight;
pub mod loadtest;
pub mod step;
pub mod summary;

use serde_json::Value;

pub use checks::{check_label, render_checks};
pub use content::should_display_body;
pub use display::render_test_result;
pub use loadtest::render_load_test;
pub use step::{render_step, render_step_summary};
pub use summary::{render_summary, WorkflowTally};

/// Run-scoped rendering options, fixed before the first result arrives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show full step detail even for passing steps and checks
    pub verbose: bool,
}

/// Milliseconds to seconds, without rounding
#[must_use]
pub fn seconds(millis: f64) -> f64 {
    millis / 1000.0
}

/// Two-space indented pretty JSON
pub(crate) fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
