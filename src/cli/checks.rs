//! Check rendering with expected-vs-given detail

use std::io::{self, Write};

use colored::Colorize;
use serde_json::Value;

use super::content::structured_value;
use super::highlight::{highlight, Language};
use super::{pretty_json, RenderOptions};
use crate::results::{Check, CheckEntry, OrderedMap};

/// Display labels for known check categories
const CHECK_LABELS: [(&str, &str); 21] = [
    ("status", "Status"),
    ("statusText", "Status Text"),
    ("redirected", "Redirected"),
    ("redirects", "Redirects"),
    ("headers", "Headers"),
    ("body", "Body"),
    ("json", "JSON"),
    ("schema", "Schema"),
    ("jsonpath", "JSONPath"),
    ("jsonexample", "JSON Example"),
    ("xpath", "XPath"),
    ("selector", "Selector"),
    ("cookies", "Cookies"),
    ("captures", "Captures"),
    ("messages", "Messages"),
    ("performance", "Performance"),
    ("ssl", "SSL"),
    ("sha256", "SHA-256"),
    ("md5", "MD5"),
    ("co2", "CO2"),
    ("size", "Size"),
];

/// Categories whose entries hold one check per component
const COMPONENT_CATEGORIES: [&str; 9] = [
    "jsonpath",
    "xpath",
    "headers",
    "messages",
    "selector",
    "cookies",
    "performance",
    "captures",
    "ssl",
];

/// Whether a category gets one check line per component
#[must_use]
pub fn has_components(category: &str) -> bool {
    COMPONENT_CATEGORIES.contains(&category)
}

/// Display label for a check category; unknown categories show their key
#[must_use]
pub fn check_label(category: &str) -> &str {
    CHECK_LABELS
        .iter()
        .find(|(key, _)| *key == category)
        .map_or(category, |&(_, label)| label)
}

/// Render a step's check group under a `Checks` heading.
///
/// Component categories render one line per component, labelled
/// `<category label> > <component>`. Every other category renders as a
/// single check.
pub fn render_checks<W: Write>(
    out: &mut W,
    checks: &OrderedMap<CheckEntry>,
    options: RenderOptions,
) -> io::Result<()> {
    writeln!(out, "{}", "\nChecks".bold())?;
    for (category, entry) in checks.iter() {
        let label = check_label(category);
        match entry {
            CheckEntry::Components(components) if has_components(category) => {
                for (component, check) in components.iter() {
                    let label = format!("{label}{}{component}", " > ".bright_black());
                    render_check(out, &label, check, options)?;
                }
            }
            CheckEntry::Components(components) => {
                render_check(out, label, &collapse(components), options)?;
            }
            CheckEntry::Single(check) => render_check(out, label, check, options)?,
        }
    }
    Ok(())
}

/// Fold per-component checks into one check that passes only if all do
fn collapse(components: &OrderedMap<Check>) -> Check {
    let mut expected = serde_json::Map::new();
    let mut given = serde_json::Map::new();
    for (component, check) in components.iter() {
        expected.insert(component.to_string(), check.expected.clone());
        given.insert(component.to_string(), check.given.clone());
    }
    Check {
        passed: components.iter().all(|(_, check)| check.passed),
        expected: Value::Object(expected),
        given: Value::Object(given),
    }
}

/// Render a single check: a pass/fail line, plus expected and given values
/// when the check failed or verbose output is on.
pub fn render_check<W: Write>(
    out: &mut W,
    label: &str,
    check: &Check,
    options: RenderOptions,
) -> io::Result<()> {
    let marker = if check.passed {
        "✔ ".green()
    } else {
        "✕ ".red()
    };
    writeln!(out, "\n{marker}{label}")?;

    if !check.passed || options.verbose {
        writeln!(out, "{}", "\nExpected\n".bright_black())?;
        render_value(out, &check.expected)?;
        writeln!(out, "{}", "\nGiven\n".bright_black())?;
        render_value(out, &check.given)?;
    }
    Ok(())
}

fn render_value<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    match structured_value(value) {
        Some(structured) => writeln!(out, "{}", highlight(&pretty_json(&structured), Language::Json)),
        None => writeln!(out, "{}", value.as_str().unwrap_or_default()),
    }
}
