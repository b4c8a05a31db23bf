//! Starter workflow for `stepci init`

use std::path::Path;

use anyhow::{Context, Result};

/// A single-test workflow that checks `https://example.com` answers 2xx
pub const DEFAULT_WORKFLOW: &str = r#"version: "1.1"
name: Status Check
env:
  host: example.com
tests:
  example:
    steps:
      - name: GET request
        http:
          url: https://${{env.host}}
          method: GET
          check:
            status: /^20/"#;

/// Write the starter workflow to `path`, replacing any existing file.
pub fn write_default_workflow(path: &Path) -> Result<()> {
    std::fs::write(path, DEFAULT_WORKFLOW)
        .with_context(|| format!("Failed to write workflow file: {}", path.display()))
}
