//! One-line messages around a run
//!
//! The per-test result line, the analytics and feedback notices, and the
//! success messages of `init` and `generate`.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use super::seconds;
use crate::results::Test;

/// Environment variable that hides the analytics notice when set
pub const DISABLE_ANALYTICS_ENV: &str = "STEPCI_DISABLE_ANALYTICS";

const FEEDBACK_URL: &str = "https://step.ci/feedback";
const PRIVACY_URL: &str = "https://step.ci/privacy";

/// `PASS`/`FAIL` badge, test name, duration and transferred bytes
pub fn render_test_result<W: Write>(out: &mut W, test: &Test) -> io::Result<()> {
    let badge = if test.passed {
        " PASS ".on_bright_green()
    } else {
        " FAIL ".on_bright_red()
    };
    writeln!(
        out,
        "{badge} {} ⏲ {}s {} {} bytes {} {} bytes",
        test.display_name().bold(),
        seconds(test.duration),
        "⬆".magenta(),
        test.bytes_sent,
        "⬇".cyan(),
        test.bytes_received
    )
}

/// Feedback link printed after every summary
pub fn render_feedback_message<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("Give us your feedback on {}", FEEDBACK_URL.underline()).bright_cyan()
    )
}

/// Whether the analytics notice should be shown, given the environment
#[must_use]
pub fn analytics_enabled() -> bool {
    std::env::var_os(DISABLE_ANALYTICS_ENV).is_none()
}

/// Notice about anonymous usage data; prints nothing when disabled
pub fn render_analytics_message<W: Write>(out: &mut W, enabled: bool) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }
    writeln!(
        out,
        "{}",
        format!("\nⓘ  Anonymous usage data collected. Learn more on {PRIVACY_URL}\n").bright_black()
    )
}

/// Warning printed before a load test starts
pub fn render_load_test_notice<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "⚠︎ Running a load test. This may take a while".bright_yellow())
}

/// Confirmation that a workflow file was written
pub fn render_workflow_written<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(
        out,
        "{} The workflow file can be found at {}",
        "Success!".bright_green(),
        path.display()
    )
}

/// Confirmation for `init`, with the command that runs the new workflow
pub fn render_init_done<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    render_workflow_written(out, path)?;
    writeln!(
        out,
        "Enter {} to run it",
        format!("stepci run {}", path.display()).bright_black()
    )
}
