//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use std::io;

use serde_json::json;

use crate::results::{Step, StepKind, Test};

/// Disable ANSI colors so rendered output can be compared as plain text.
pub fn plain_output() {
    colored::control::set_override(false);
}

/// Run a renderer against an in-memory buffer and return what it wrote.
pub fn rendered<F>(render: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut buffer = Vec::new();
    render(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Create a minimal HTTP `Step` for testing with sensible defaults.
///
/// The step belongs to test `test`, takes 1500ms and carries a single
/// status check whose outcome matches `passed`.
#[must_use]
pub fn make_step(name: &str, passed: bool) -> Step {
    let (status, status_text) = if passed {
        (200, "OK")
    } else {
        (500, "Internal Server Error")
    };
    Step {
        id: name.to_string(),
        test_id: "test".to_string(),
        name: Some(name.to_string()),
        kind: StepKind::Http,
        passed,
        skipped: false,
        errored: false,
        error_message: None,
        duration: 1500.0,
        request: Some(json!({
            "method": "GET",
            "url": "https://example.com",
            "protocol": "HTTP/1.1"
        })),
        response: Some(json!({
            "protocol": "HTTP/1.1",
            "status": status,
            "statusText": status_text,
            "contentType": "text/plain",
            "body": "hello"
        })),
        captures: None,
        cookies: None,
        checks: serde_json::from_value(json!({
            "status": {"passed": passed, "expected": 200, "given": status}
        }))
        .ok(),
    }
}

/// Create a `Test` named `name` wrapping `steps`.
#[must_use]
pub fn make_test(name: &str, passed: bool, steps: Vec<Step>) -> Test {
    Test {
        id: name.to_string(),
        name: Some(name.to_string()),
        passed,
        duration: 3000.0,
        bytes_sent: 0,
        bytes_received: 0,
        steps,
    }
}
