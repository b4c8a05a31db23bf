//! End-of-workflow summary

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use super::seconds;
use crate::results::WorkflowResult;

/// Test and step counters across a workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowTally {
    /// Tests that passed
    pub passed_tests: usize,
    /// Tests that failed
    pub failed_tests: usize,
    /// All tests
    pub total_tests: usize,
    /// Steps that passed
    pub passed_steps: usize,
    /// Steps that were skipped
    pub skipped_steps: usize,
    /// Steps that did not pass, skipped ones included
    pub failed_steps: usize,
    /// All steps
    pub total_steps: usize,
}

impl WorkflowTally {
    /// Count tests and steps; steps are flattened in test order
    #[must_use]
    pub fn from_result(result: &WorkflowResult) -> Self {
        let mut tally = Self {
            total_tests: result.tests.len(),
            ..Self::default()
        };
        for test in &result.tests {
            if test.passed {
                tally.passed_tests += 1;
            } else {
                tally.failed_tests += 1;
            }
            for step in &test.steps {
                tally.total_steps += 1;
                if step.passed {
                    tally.passed_steps += 1;
                } else {
                    tally.failed_steps += 1;
                }
                if step.skipped {
                    tally.skipped_steps += 1;
                }
            }
        }
        tally
    }
}

/// Bold text, colored only when the count is non-zero
fn count(n: usize, noun: &str, color: fn(ColoredString) -> ColoredString) -> ColoredString {
    let text = format!("{n} {noun}").bold();
    if n > 0 {
        color(text)
    } else {
        text
    }
}

/// Print test/step counts, timing, CO2 estimate and the final banner.
pub fn render_summary<W: Write>(out: &mut W, result: &WorkflowResult) -> io::Result<()> {
    let tally = WorkflowTally::from_result(result);
    let secs = seconds(result.duration);

    writeln!(
        out,
        "\n{} {}, {}, {} total",
        "Tests:".bold(),
        count(tally.failed_tests, "failed", |s| s.bright_red()),
        count(tally.passed_tests, "passed", |s| s.bright_green()),
        tally.total_tests
    )?;
    writeln!(
        out,
        "{} {}, {}, {}, {} total",
        "Steps:".bold(),
        count(tally.failed_steps, "failed", |s| s.bright_red()),
        count(tally.skipped_steps, "skipped", |s| s.bright_yellow()),
        count(tally.passed_steps, "passed", |s| s.bright_green()),
        tally.total_steps
    )?;
    // half-seconds round up
    writeln!(out, "{}  {secs}s, estimated {}s", "Time:".bold(), secs.round())?;
    writeln!(
        out,
        "{}   {}",
        "CO2:".bold(),
        format!("{:.5}g", result.co2).bright_green()
    )?;
    render_outcome_banner(out, result.passed, result.duration)
}

/// Final "Workflow passed/failed after Ns" line
pub fn render_outcome_banner<W: Write>(out: &mut W, passed: bool, duration: f64) -> io::Result<()> {
    let secs = seconds(duration);
    if passed {
        writeln!(out, "{}", format!("\nWorkflow passed after {secs}s").bright_green())
    } else {
        writeln!(out, "{}", format!("\nWorkflow failed after {secs}s").bright_red())
    }
}
