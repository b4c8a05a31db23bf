//! Event stream parser for the runner's newline-delimited JSON output
//!
//! Each line is one event object carrying an `event` name and a payload:
//! `{"event": "test:result", "test": {..}}` or
//! `{"event": "workflow:result", "result": {..}}`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::results::{LoadTestResult, Test, WorkflowResult};

/// Event name emitted when a test finishes
pub const TEST_RESULT_EVENT: &str = "test:result";
/// Event name emitted once the whole workflow finishes
pub const WORKFLOW_RESULT_EVENT: &str = "workflow:result";

/// A parsed event from the runner
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// A test completed
    TestResult(Box<Test>),
    /// The workflow completed
    WorkflowResult(Box<WorkflowResult>),
    /// Event name this front end does not handle
    Unknown {
        /// The raw event name
        event: String,
    },
}

/// Parse a single line of runner output into a `RunEvent`.
///
/// Returns `None` for empty lines, lines that are not JSON, and known
/// events whose payload does not match the expected shape.
#[must_use]
pub fn parse_event(line: &str) -> Option<RunEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, line, "skipping runner output that is not JSON");
            return None;
        }
    };
    let Some(event) = value.get("event").and_then(Value::as_str) else {
        tracing::warn!(line, "skipping runner output without an event name");
        return None;
    };

    match event {
        TEST_RESULT_EVENT => payload(&value, event, "test").map(|t| RunEvent::TestResult(Box::new(t))),
        WORKFLOW_RESULT_EVENT => {
            payload(&value, event, "result").map(|r| RunEvent::WorkflowResult(Box::new(r)))
        }
        other => {
            tracing::debug!(event = other, "ignoring unknown runner event");
            Some(RunEvent::Unknown {
                event: other.to_string(),
            })
        }
    }
}

fn payload<T: DeserializeOwned>(value: &Value, event: &str, field: &str) -> Option<T> {
    let Some(raw) = value.get(field) else {
        tracing::warn!(event, field, "runner event is missing its payload");
        return None;
    };
    match T::deserialize(raw) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(event, %err, "runner event payload has an unexpected shape");
            None
        }
    }
}

#[derive(Deserialize)]
struct LoadTestEnvelope {
    result: LoadTestResult,
}

/// Parse the single JSON document a load-test run prints
pub fn parse_load_test(output: &[u8]) -> serde_json::Result<LoadTestResult> {
    serde_json::from_slice::<LoadTestEnvelope>(output).map(|envelope| envelope.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_line() {
        assert!(parse_event("").is_none());
        assert!(parse_event("   ").is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_event("not json").is_none());
        assert!(parse_event("{broken").is_none());
    }

    #[test]
    fn test_parse_missing_event_name() {
        assert!(parse_event(r#"{"test": {"id": "a"}}"#).is_none());
    }

    #[test]
    fn test_parse_test_result() {
        let line = r#"{"event":"test:result","test":{"id":"t1","name":"Login","passed":true,"duration":120,"bytesSent":10,"bytesReceived":20,"steps":[]}}"#;
        match parse_event(line) {
            Some(RunEvent::TestResult(test)) => {
                assert_eq!(test.id, "t1");
                assert_eq!(test.bytes_received, 20);
                assert!(test.passed);
            }
            other => panic!("Expected TestResult, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_workflow_result() {
        let line = r#"{"event":"workflow:result","result":{"passed":false,"duration":900,"co2":0.001,"tests":[]}}"#;
        match parse_event(line) {
            Some(RunEvent::WorkflowResult(result)) => {
                assert!(!result.passed);
                assert!(result.tests.is_empty());
            }
            other => panic!("Expected WorkflowResult, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_known_event_with_bad_payload() {
        assert!(parse_event(r#"{"event":"test:result","test":{"passed":true}}"#).is_none());
        assert!(parse_event(r#"{"event":"workflow:result"}"#).is_none());
    }

    #[test]
    fn test_parse_unknown_event() {
        assert_eq!(
            parse_event(r#"{"event":"step:result","step":{}}"#),
            Some(RunEvent::Unknown {
                event: "step:result".to_string()
            })
        );
    }

    #[test]
    fn test_parse_load_test_document() {
        let output = br#"{"result":{"passed":true,"duration":1000,"rps":5,"iterations":5,
            "responseTime":{"min":1,"max":2,"avg":1.5,"med":1.5,"p95":2,"p99":2},
            "stats":{"steps":{"failed":0,"passed":5,"skipped":0,"errored":0,"total":5},
                     "tests":{"failed":0,"passed":5,"total":5}}}}"#;
        let result = parse_load_test(output).unwrap();
        assert!(result.passed);
        assert_eq!(result.stats.tests.total, 5);
    }

    #[test]
    fn test_parse_load_test_rejects_garbage() {
        assert!(parse_load_test(b"oops").is_err());
    }
}
