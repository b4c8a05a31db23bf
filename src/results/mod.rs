//! Result data produced by the workflow execution engine
//!
//! These types mirror the JSON the engine emits. They are read-only inputs
//! to the renderers in [`crate::cli`]; nothing here is mutated after
//! deserialization.

pub mod exchange;
pub mod ordered;

use serde::Deserialize;
use serde_json::Value;

pub use exchange::{Body, GrpcResponse, HttpRequest, HttpResponse, SseResponse};
pub use ordered::OrderedMap;

/// A single expected-vs-given assertion
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Check {
    /// Whether the assertion held
    pub passed: bool,
    /// What the workflow expected
    #[serde(default)]
    pub expected: Value,
    /// What the response actually contained
    #[serde(default)]
    pub given: Value,
}

/// One entry in a step's check group
///
/// Most categories hold a single check; categories such as `jsonpath` or
/// `headers` hold one check per component (JSON path, header name, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CheckEntry {
    /// A single check for the whole category
    Single(Check),
    /// Component name to check
    Components(OrderedMap<Check>),
}

/// Protocol used by a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Plain HTTP request/response
    Http,
    /// Server-sent events stream
    Sse,
    /// gRPC call
    Grpc,
    /// Step type this front end does not know how to display
    #[default]
    #[serde(other)]
    Unknown,
}

/// One protocol interaction plus its evaluated checks
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step identifier
    pub id: String,
    /// Identifier of the owning test
    #[serde(default)]
    pub test_id: String,
    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,
    /// Protocol of the step
    #[serde(rename = "type", default)]
    pub kind: StepKind,
    /// Whether every check passed
    #[serde(default)]
    pub passed: bool,
    /// Whether the step was skipped
    #[serde(default)]
    pub skipped: bool,
    /// Whether the step errored before checks could run
    #[serde(default)]
    pub errored: bool,
    /// Error or skip reason
    #[serde(default)]
    pub error_message: Option<String>,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: f64,
    /// Protocol-specific request object
    #[serde(default)]
    pub request: Option<Value>,
    /// Protocol-specific response object
    #[serde(default)]
    pub response: Option<Value>,
    /// Values captured from the response
    #[serde(default)]
    pub captures: Option<Value>,
    /// Cookies held after the step
    #[serde(default)]
    pub cookies: Option<Value>,
    /// Check category to evaluated check(s)
    #[serde(default)]
    pub checks: Option<OrderedMap<CheckEntry>>,
}

impl Step {
    /// Name to show for the step, falling back to its id
    #[must_use]
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref(), &self.id)
    }
}

/// An ordered sequence of steps sharing a pass/fail outcome
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    /// Test identifier
    pub id: String,
    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,
    /// Whether every step passed
    #[serde(default)]
    pub passed: bool,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: f64,
    /// Bytes sent over all steps
    #[serde(default)]
    pub bytes_sent: u64,
    /// Bytes received over all steps
    #[serde(default)]
    pub bytes_received: u64,
    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Test {
    /// Name to show for the test, falling back to its id
    #[must_use]
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref(), &self.id)
    }
}

/// Outcome of a complete workflow run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    /// Whether every test passed
    #[serde(default)]
    pub passed: bool,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: f64,
    /// Estimated emissions in grams
    #[serde(default)]
    pub co2: f64,
    /// Tests in execution order
    #[serde(default)]
    pub tests: Vec<Test>,
}

/// Latency distribution of a load test, in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseTimes {
    /// Fastest response
    pub min: f64,
    /// Slowest response
    pub max: f64,
    /// Mean response time
    pub avg: f64,
    /// Median response time
    pub med: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

/// Step counters over all load-test iterations
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StepStats {
    /// Steps that failed
    pub failed: u64,
    /// Steps that passed
    pub passed: u64,
    /// Steps that were skipped
    pub skipped: u64,
    /// Steps that errored
    pub errored: u64,
    /// All steps
    pub total: u64,
}

/// Test counters over all load-test iterations
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TestStats {
    /// Tests that failed
    pub failed: u64,
    /// Tests that passed
    pub passed: u64,
    /// All tests
    pub total: u64,
}

/// Step and test counters of a load test
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoadStats {
    /// Step counters
    pub steps: StepStats,
    /// Test counters
    pub tests: TestStats,
}

/// Pass state of a named load-test threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ThresholdOutcome {
    /// Whether the threshold held
    pub passed: bool,
}

/// Aggregate statistics of a load test
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestResult {
    /// Whether the load test met its thresholds
    #[serde(default)]
    pub passed: bool,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: f64,
    /// Requests per second
    #[serde(default)]
    pub rps: f64,
    /// Completed workflow iterations
    #[serde(default)]
    pub iterations: u64,
    /// Latency distribution
    #[serde(default)]
    pub response_time: ResponseTimes,
    /// Step and test counters
    #[serde(default)]
    pub stats: LoadStats,
    /// Named threshold outcomes
    #[serde(default)]
    pub checks: Option<OrderedMap<ThresholdOutcome>>,
}

fn display_name<'a>(name: Option<&'a str>, id: &'a str) -> &'a str {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_deserializes_camel_case_fields() {
        let step: Step = serde_json::from_value(json!({
            "id": "get-user",
            "testId": "users",
            "name": "Get user",
            "type": "http",
            "passed": false,
            "skipped": false,
            "errored": false,
            "duration": 1234,
            "errorMessage": null,
            "request": {"method": "GET"},
            "response": {"status": 200}
        }))
        .unwrap();

        assert_eq!(step.test_id, "users");
        assert_eq!(step.kind, StepKind::Http);
        assert!((step.duration - 1234.0).abs() < f64::EPSILON);
        assert!(step.request.is_some());
        assert!(step.checks.is_none());
    }

    #[test]
    fn test_unknown_step_type_is_tolerated() {
        let step: Step = serde_json::from_value(json!({"id": "s", "type": "websocket"})).unwrap();
        assert_eq!(step.kind, StepKind::Unknown);
    }

    #[test]
    fn test_missing_step_type_defaults_to_unknown() {
        let step: Step = serde_json::from_value(json!({"id": "s"})).unwrap();
        assert_eq!(step.kind, StepKind::Unknown);
    }

    #[test]
    fn test_check_entry_distinguishes_single_and_components() {
        let checks: OrderedMap<CheckEntry> = serde_json::from_value(json!({
            "status": {"passed": false, "expected": "/^20/", "given": 500},
            "jsonpath": {
                "$.id": {"passed": true, "expected": 1, "given": 1},
                "$.name": {"passed": false, "expected": "a", "given": "b"}
            }
        }))
        .unwrap();

        assert!(matches!(checks.get("status"), Some(CheckEntry::Single(c)) if !c.passed));
        match checks.get("jsonpath") {
            Some(CheckEntry::Components(components)) => {
                let names: Vec<&str> = components.iter().map(|(k, _)| k).collect();
                assert_eq!(names, vec!["$.id", "$.name"]);
            }
            other => panic!("expected components, got {other:?}"),
        }
    }

    #[test]
    fn test_check_without_values_defaults_to_null() {
        let check: Check = serde_json::from_value(json!({"passed": true})).unwrap();
        assert_eq!(check.expected, Value::Null);
        assert_eq!(check.given, Value::Null);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let test: Test = serde_json::from_value(json!({"id": "t1", "name": ""})).unwrap();
        assert_eq!(test.display_name(), "t1");

        let named: Test = serde_json::from_value(json!({"id": "t1", "name": "Login"})).unwrap();
        assert_eq!(named.display_name(), "Login");
    }

    #[test]
    fn test_workflow_result_with_no_tests() {
        let result: WorkflowResult =
            serde_json::from_value(json!({"passed": true, "duration": 0, "co2": 0.0, "tests": []}))
                .unwrap();
        assert!(result.tests.is_empty());
    }

    #[test]
    fn test_load_test_result_deserializes() {
        let result: LoadTestResult = serde_json::from_value(json!({
            "passed": true,
            "duration": 10000,
            "rps": 42.5,
            "iterations": 100,
            "responseTime": {"min": 1, "max": 300, "avg": 50, "med": 45, "p95": 120, "p99": 250},
            "stats": {
                "steps": {"failed": 1, "passed": 9, "skipped": 0, "errored": 0, "total": 10},
                "tests": {"failed": 0, "passed": 5, "total": 5}
            },
            "checks": {"p99 < 500": {"passed": true}}
        }))
        .unwrap();

        assert_eq!(result.iterations, 100);
        assert_eq!(result.stats.steps.failed, 1);
        assert!((result.response_time.p95 - 120.0).abs() < f64::EPSILON);
        assert_eq!(result.checks.as_ref().map(OrderedMap::len), Some(1));
    }
}
