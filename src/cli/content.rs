//! Content sniffing helpers for the renderers
//!
//! Decides whether a response body is worth printing as text and whether a
//! check value should be shown as structured JSON.

use serde_json::Value;

/// Placeholder printed instead of a body that is not text
pub const UNDISPLAYABLE_BODY: &str = "Response body not displayed due to unsupported Content-Type";

const APPLICATION_TEXT_SUBTYPES: [&str; 5] = ["json", "xml", "csv", "javascript", "ecmascript"];

/// Whether a body with the given content type can be printed as text.
///
/// A missing or empty content type is treated as displayable. Parameters
/// such as `; charset=utf-8` are ignored; matching is case-sensitive.
#[must_use]
pub fn should_display_body(content_type: Option<&str>) -> bool {
    let content_type = match content_type {
        None | Some("") => return true,
        Some(content_type) => content_type,
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if essence.starts_with("text/") {
        return true;
    }

    let Some(subtype) = essence.strip_prefix("application/") else {
        return false;
    };
    let bare = subtype.strip_prefix("x-").unwrap_or(subtype);
    APPLICATION_TEXT_SUBTYPES.contains(&bare)
        || subtype.ends_with("+json")
        || subtype.ends_with("+xml")
}

/// The structured form of a check value, if it has one.
///
/// Objects, arrays, numbers, booleans and null are structured as-is. A
/// string is structured when its content parses as JSON, in which case the
/// parsed value is returned. Other strings return `None` and are shown raw.
#[must_use]
pub fn structured_value(value: &Value) -> Option<Value> {
    match value {
        Value::String(text) => serde_json::from_str(text).ok(),
        other => Some(other.clone()),
    }
}
