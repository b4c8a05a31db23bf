//! Load-test statistics report

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

use super::summary::render_outcome_banner;
use crate::results::LoadTestResult;

/// Column at which every value starts, counted from the line start
const REPORT_WIDTH: usize = 65;

/// `<indent><label>: ..... <value>` with the value column aligned
fn report_line<W: Write>(
    out: &mut W,
    indent: usize,
    label: &str,
    value: impl Display,
) -> io::Result<()> {
    let fill = REPORT_WIDTH.saturating_sub(indent + label.chars().count());
    writeln!(
        out,
        "{:indent$}{label}: {} {value}",
        "",
        ".".repeat(fill).bright_black()
    )
}

/// Print latency percentiles, counters, named thresholds, throughput and
/// the final banner of a load test.
pub fn render_load_test<W: Write>(out: &mut W, result: &LoadTestResult) -> io::Result<()> {
    let latency = &result.response_time;
    writeln!(out, "\nresponse_time:")?;
    for (label, value) in [
        ("min", latency.min),
        ("max", latency.max),
        ("avg", latency.avg),
        ("med", latency.med),
        ("p95", latency.p95),
        ("p99", latency.p99),
    ] {
        report_line(out, 2, label, value.to_string().yellow())?;
    }

    let steps = &result.stats.steps;
    writeln!(out, "steps:")?;
    for (label, value) in [
        ("failed", steps.failed),
        ("passed", steps.passed),
        ("skipped", steps.skipped),
        ("errored", steps.errored),
        ("total", steps.total),
    ] {
        report_line(out, 2, label, value.to_string().yellow())?;
    }

    let tests = &result.stats.tests;
    writeln!(out, "tests:")?;
    for (label, value) in [
        ("failed", tests.failed),
        ("passed", tests.passed),
        ("total", tests.total),
    ] {
        report_line(out, 2, label, value.to_string().yellow())?;
    }

    if let Some(checks) = &result.checks {
        writeln!(out, "checks")?;
        for (name, outcome) in checks.iter() {
            let verdict = if outcome.passed {
                "pass".green()
            } else {
                "fail".red()
            };
            report_line(out, 2, name, verdict)?;
        }
    }

    report_line(out, 0, "rps", result.rps.to_string().yellow())?;
    report_line(out, 0, "iterations", result.iterations.to_string().yellow())?;
    report_line(out, 0, "duration", result.duration.to_string().yellow())?;
    render_outcome_banner(out, result.passed, result.duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{LoadStats, ResponseTimes, StepStats, TestStats};
    use crate::testutil::{plain_output, rendered};
    use serde_json::json;

    fn sample() -> LoadTestResult {
        LoadTestResult {
            passed: true,
            duration: 10000.0,
            rps: 42.5,
            iterations: 100,
            response_time: ResponseTimes {
                min: 3.0,
                max: 310.0,
                avg: 51.2,
                med: 45.0,
                p95: 120.0,
                p99: 250.0,
            },
            stats: LoadStats {
                steps: StepStats {
                    failed: 1,
                    passed: 9,
                    skipped: 0,
                    errored: 0,
                    total: 10,
                },
                tests: TestStats {
                    failed: 0,
                    passed: 5,
                    total: 5,
                },
            },
            checks: None,
        }
    }

    fn value_column(line: &str) -> usize {
        line.rfind(' ').map_or(0, |i| i + 1)
    }

    #[test]
    fn test_report_contains_percentiles_and_counters() {
        plain_output();
        let output = rendered(|out| render_load_test(out, &sample()));
        assert!(output.lines().any(|l| l.contains("p95") && l.contains("120")));
        assert!(output.lines().any(|l| l.contains("failed") && l.ends_with(" 1")));
        assert!(output.contains("rps: "));
        assert!(output.contains("Workflow passed after 10s"));
    }

    #[test]
    fn test_values_are_column_aligned() {
        plain_output();
        let output = rendered(|out| render_load_test(out, &sample()));
        let columns: Vec<usize> = output
            .lines()
            .filter(|l| l.contains(": ."))
            .map(value_column)
            .collect();
        assert!(!columns.is_empty());
        assert!(columns.iter().all(|&c| c == REPORT_WIDTH + 3));
    }

    #[test]
    fn test_fixed_labels_match_classic_dot_counts() {
        plain_output();
        let output = rendered(|out| render_load_test(out, &sample()));
        let min_line = output.lines().find(|l| l.starts_with("  min:")).unwrap();
        assert_eq!(min_line.matches('.').count(), 60);
        let rps_line = output.lines().find(|l| l.starts_with("rps:")).unwrap();
        assert_eq!(rps_line.matches('.').count(), 62 + 1);
    }

    #[test]
    fn test_named_checks_render_pass_and_fail() {
        plain_output();
        let mut result = sample();
        result.passed = false;
        result.checks = serde_json::from_value(json!({
            "p99 < 500": {"passed": true},
            "errors == 0": {"passed": false}
        }))
        .unwrap();

        let output = rendered(|out| render_load_test(out, &result));
        assert!(output.contains("checks\n"));
        assert!(output.lines().any(|l| l.starts_with("  p99 < 500:") && l.ends_with("pass")));
        assert!(output.lines().any(|l| l.starts_with("  errors == 0:") && l.ends_with("fail")));
        assert!(output.contains("Workflow failed after 10s"));
    }

    #[test]
    fn test_long_label_does_not_underflow() {
        plain_output();
        let label = "x".repeat(80);
        let output = rendered(|out| report_line(out, 2, &label, "v"));
        assert_eq!(output, format!("  {label}:  v\n"));
    }
}
