//! Runner process execution
//!
//! Spawns the external engine, feeds its event stream to a listener, and
//! reports the overall outcome.

use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

use super::listener::{dispatch, ResultListener};
use super::stream::{parse_load_test, RunEvent};
use crate::results::LoadTestResult;

/// Exit status used when a workflow or load test does not pass
pub const FAILURE_EXIT_CODE: i32 = 5;

/// Outcome of a streamed workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Whether the workflow passed
    pub passed: bool,
    /// Number of test results received
    pub tests: usize,
    /// Runner process exit code (None if killed by signal)
    pub exit_code: Option<i32>,
}

impl RunReport {
    /// Process exit status this run maps to
    #[must_use]
    pub const fn process_exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            FAILURE_EXIT_CODE
        }
    }
}

/// Format an exit code for display, returning "unknown" if the process was killed by signal.
fn format_exit_code(exit_code: Option<i32>) -> String {
    exit_code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// Run a workflow command and push every event to `listener` as it arrives.
///
/// The runner's stderr is passed through to the terminal. The run fails if
/// the stream ends without a workflow result. If reading or rendering fails,
/// the runner is killed before the error is returned.
pub async fn run_workflow<L: ResultListener + ?Sized>(
    cmd: Command,
    listener: &mut L,
) -> Result<RunReport> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(%program, "spawning workflow runner");

    let mut child = TokioCommand::from(cmd)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to spawn workflow runner '{program}'"))?;

    let stdout = child
        .stdout
        .take()
        .context("No stdout from workflow runner")?;
    let mut lines = BufReader::new(stdout).lines();
    let mut tests = 0;
    let mut passed = None;

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read workflow runner output")?
    {
        let Some(event) = parse_event_logged(&line) else {
            continue;
        };
        dispatch(listener, &event).context("Failed to write results")?;
        match &event {
            RunEvent::TestResult(_) => tests += 1,
            RunEvent::WorkflowResult(result) => passed = Some(result.passed),
            RunEvent::Unknown { .. } => {}
        }
    }

    let status = child
        .wait()
        .await
        .context("Failed waiting for workflow runner")?;

    let Some(passed) = passed else {
        bail!(
            "Workflow runner exited with code {} without reporting a workflow result",
            format_exit_code(status.code())
        );
    };

    Ok(RunReport {
        passed,
        tests,
        exit_code: status.code(),
    })
}

fn parse_event_logged(line: &str) -> Option<RunEvent> {
    let event = super::stream::parse_event(line);
    if let Some(RunEvent::TestResult(test)) = &event {
        tracing::debug!(test = %test.id, passed = test.passed, "test result received");
    }
    event
}

/// Run a load-test command to completion and parse its result document.
pub async fn run_load_test(cmd: Command) -> Result<LoadTestResult> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(%program, "spawning load test runner");

    let output = TokioCommand::from(cmd)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .await
        .with_context(|| format!("Failed to spawn load test runner '{program}'"))?;

    match parse_load_test(&output.stdout) {
        Ok(result) => Ok(result),
        Err(err) if output.status.success() => {
            Err(err).context("Failed to parse load test result")
        }
        Err(_) => bail!(
            "Load test runner exited with code {} without a result",
            format_exit_code(output.status.code())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{Test, WorkflowResult};
    use std::io;

    #[derive(Default)]
    struct Recorder {
        tests: Vec<String>,
        workflows: Vec<bool>,
    }

    impl ResultListener for Recorder {
        fn on_test_result(&mut self, test: &Test) -> io::Result<()> {
            self.tests.push(test.id.clone());
            Ok(())
        }

        fn on_workflow_result(&mut self, result: &WorkflowResult) -> io::Result<()> {
            self.workflows.push(result.passed);
            Ok(())
        }
    }

    fn script(body: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(body);
        cmd
    }

    const TEST_LINE: &str = r#"{"event":"test:result","test":{"id":"t1","passed":true,"steps":[]}}"#;
    const PASSED_LINE: &str =
        r#"{"event":"workflow:result","result":{"passed":true,"duration":10,"co2":0,"tests":[]}}"#;
    const FAILED_LINE: &str =
        r#"{"event":"workflow:result","result":{"passed":false,"duration":10,"co2":0,"tests":[]}}"#;

    #[tokio::test]
    async fn test_run_workflow_dispatches_in_order() {
        let mut recorder = Recorder::default();
        let cmd = script(&format!(
            "echo '{TEST_LINE}'; echo 'some log noise'; echo '{PASSED_LINE}'"
        ));

        let report = run_workflow(cmd, &mut recorder).await.unwrap();
        assert_eq!(recorder.tests, vec!["t1"]);
        assert_eq!(recorder.workflows, vec![true]);
        assert!(report.passed);
        assert_eq!(report.tests, 1);
        assert_eq!(report.process_exit_code(), 0);
    }

    #[tokio::test]
    async fn test_run_workflow_failure_maps_to_exit_code() {
        let mut recorder = Recorder::default();
        let cmd = script(&format!("echo '{FAILED_LINE}'"));

        let report = run_workflow(cmd, &mut recorder).await.unwrap();
        assert!(!report.passed);
        assert_eq!(report.process_exit_code(), FAILURE_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_run_workflow_with_zero_tests() {
        let mut recorder = Recorder::default();
        let report = run_workflow(script(&format!("echo '{PASSED_LINE}'")), &mut recorder)
            .await
            .unwrap();
        assert_eq!(report.tests, 0);
        assert!(recorder.tests.is_empty());
    }

    #[tokio::test]
    async fn test_run_workflow_without_result_is_error() {
        let mut recorder = Recorder::default();
        let err = run_workflow(script("echo 'crashed' >&2; exit 3"), &mut recorder)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("code 3"), "{err}");
    }

    #[tokio::test]
    async fn test_run_workflow_missing_binary_is_error() {
        let mut recorder = Recorder::default();
        let cmd = Command::new("definitely-not-a-stepci-runner");
        assert!(run_workflow(cmd, &mut recorder).await.is_err());
    }

    struct ClosedOutput;

    impl ResultListener for ClosedOutput {
        fn on_test_result(&mut self, _test: &Test) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"))
        }

        fn on_workflow_result(&mut self, _result: &WorkflowResult) -> io::Result<()> {
            Ok(())
        }
    }

    /// Whether `pid` is a live (non-zombie) process
    fn is_running(pid: &str) -> bool {
        std::fs::read_to_string(format!("/proc/{pid}/stat")).is_ok_and(|stat| {
            let state = stat.rsplit(')').next().unwrap_or_default().trim_start();
            !state.starts_with('Z') && !state.starts_with('X')
        })
    }

    #[tokio::test]
    async fn test_listener_error_kills_runner() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("runner.pid");
        let cmd = script(&format!(
            "echo $$ > '{}'; echo '{TEST_LINE}'; exec sleep 30",
            pid_file.display()
        ));

        let err = run_workflow(cmd, &mut ClosedOutput).await.unwrap_err();
        assert!(err.to_string().contains("Failed to write results"), "{err}");

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let pid = pid.trim();
        for _ in 0..100 {
            if !is_running(pid) {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("runner process {pid} outlived the failed run");
    }

    #[tokio::test]
    async fn test_run_load_test_parses_output() {
        let doc = r#"{"result":{"passed":false,"duration":1000,"rps":3,"iterations":3}}"#;
        let result = run_load_test(script(&format!("echo '{doc}'"))).await.unwrap();
        assert!(!result.passed);
        assert_eq!(result.iterations, 3);
    }

    #[tokio::test]
    async fn test_run_load_test_reports_runner_failure() {
        let err = run_load_test(script("exit 2")).await.unwrap_err();
        assert!(err.to_string().contains("code 2"), "{err}");
    }

    #[test]
    fn test_format_exit_code() {
        assert_eq!(format_exit_code(Some(1)), "1");
        assert_eq!(format_exit_code(None), "unknown");
    }
}
