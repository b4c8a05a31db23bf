//! `key=value` variables passed with `--env` and `--secret`

/// Whether an entry has the `name=value` shape: a non-empty word name
/// (ASCII letters, digits, `_`), `=`, and a non-empty single-line value.
#[must_use]
pub fn is_valid_pair(entry: &str) -> bool {
    let Some((key, value)) = entry.split_once('=') else {
        return false;
    };
    !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
        && !value.is_empty()
        && !value.contains(['\n', '\r', '\u{2028}', '\u{2029}'])
}

fn parse_pair(entry: &str, kind: &str) -> Result<(String, String), String> {
    match entry.split_once('=') {
        Some((key, value)) if is_valid_pair(entry) => Ok((key.to_string(), value.to_string())),
        _ => Err(format!(
            "{kind} variables have wrong format, use `{kind}=VARIABLE`."
        )),
    }
}

/// Parse an `--env` entry, splitting on the first `=`.
///
/// # Errors
///
/// Returns the user-facing format message when the entry is malformed.
pub fn parse_env_var(entry: &str) -> Result<(String, String), String> {
    parse_pair(entry, "env")
}

/// Parse a `--secret` entry, splitting on the first `=`.
///
/// # Errors
///
/// Returns the user-facing format message when the entry is malformed.
pub fn parse_secret(entry: &str) -> Result<(String, String), String> {
    parse_pair(entry, "secret")
}

/// Collapse repeated names into one entry each; the last value wins and
/// each name keeps the position of its first occurrence.
#[must_use]
pub fn to_mapping(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut mapping: Vec<(String, String)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        match mapping.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => mapping.push((key, value)),
        }
    }
    mapping
}
