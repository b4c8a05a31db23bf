//! Request/response blocks for HTTP, SSE and gRPC steps

use std::fmt::Write as _;
use std::io::{self, Write};

use colored::Colorize;
use serde::Deserialize;
use serde_json::Value;

use super::content::{should_display_body, UNDISPLAYABLE_BODY};
use super::highlight::{highlight, Language};
use super::pretty_json;
use crate::results::{GrpcResponse, HttpRequest, HttpResponse, OrderedMap, SseResponse, StepKind};

/// Render the request and response of a step according to its protocol.
///
/// Steps of an unknown kind render nothing.
pub fn render_request_response<W: Write>(
    out: &mut W,
    kind: StepKind,
    request: Option<&Value>,
    response: Option<&Value>,
) -> io::Result<()> {
    let tag = match kind {
        StepKind::Http => " HTTP ",
        StepKind::Sse => " SSE ",
        StepKind::Grpc => " GRPC ",
        StepKind::Unknown => return Ok(()),
    };

    if let Some(request) = request {
        writeln!(out, "\n{} {}\n", "Request".bold(), tag.bold().on_bright_black())?;
        let (text, language) = match kind {
            StepKind::Http => typed_or_json(request, |r: HttpRequest| {
                (http_request_text(&r), Language::Http)
            }),
            _ => (pretty_json(request), Language::Json),
        };
        writeln!(out, "{}", highlight(&text, language))?;
    }

    if let Some(response) = response {
        match kind {
            // the HTTP request block already ends in a blank line
            StepKind::Http => writeln!(out, "{}\n", "Response".bold())?,
            _ => writeln!(out, "\n{}\n", "Response".bold())?,
        }
        let (text, language) = match kind {
            StepKind::Http => typed_or_json(response, |r: HttpResponse| {
                (http_response_text(&r), Language::Http)
            }),
            StepKind::Sse => typed_or_json(response, |r: SseResponse| {
                (r.body.to_text().into_owned(), Language::Text)
            }),
            _ => typed_or_json(response, |r: GrpcResponse| {
                (pretty_json(&r.body), Language::Json)
            }),
        };
        writeln!(out, "{}", highlight(&text, language))?;
    }

    Ok(())
}

/// Read `value` as `T` and format it, or fall back to pretty JSON
fn typed_or_json<'v, T, F>(value: &'v Value, format: F) -> (String, Language)
where
    T: Deserialize<'v>,
    F: FnOnce(T) -> (String, Language),
{
    match T::deserialize(value) {
        Ok(typed) => format(typed),
        Err(err) => {
            tracing::debug!(%err, "unexpected exchange shape, showing raw JSON");
            (pretty_json(value), Language::Json)
        }
    }
}

/// HTTP request as an HTTP message: start line, headers, optional body
#[must_use]
pub fn http_request_text(request: &HttpRequest) -> String {
    let mut text = format!("{} {} {}\n", request.method, request.url, request.protocol);
    push_headers(&mut text, request.headers.as_ref());
    if let Some(Value::String(body)) = &request.body {
        text.push('\n');
        text.push_str(body);
    }
    text
}

/// HTTP response as an HTTP message; non-text bodies are replaced by a notice
#[must_use]
pub fn http_response_text(response: &HttpResponse) -> String {
    let mut text = format!(
        "{} {} {}\n",
        response.protocol, response.status, response.status_text
    );
    push_headers(&mut text, response.headers.as_ref());
    text.push('\n');
    if should_display_body(response.effective_content_type()) {
        text.push_str(&response.body.to_text());
    } else {
        text.push_str(UNDISPLAYABLE_BODY);
    }
    text
}

fn push_headers(text: &mut String, headers: Option<&OrderedMap<Value>>) {
    let Some(headers) = headers else { return };
    for (name, value) in headers.iter() {
        let _ = writeln!(text, "{name}: {}", header_value(value));
    }
}

fn header_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(values) => values
            .iter()
            .map(header_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
