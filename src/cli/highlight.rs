//! Terminal syntax highlighting for request/response blocks
//!
//! A small tolerant lexer per language. Tokens the lexer does not recognise
//! are passed through unstyled, so malformed input never stops rendering.

use colored::Colorize;

/// Language tag for a highlighted block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// HTTP message: start line, headers, body
    Http,
    /// JSON document
    Json,
    /// Plain text
    Text,
}

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    // Truncation keeps the addressed byte
    #[allow(clippy::cast_possible_truncation)]
    const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// Token colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Header names, JSON keys, HTTP versions
    pub name: Rgb,
    /// String values and URLs
    pub string: Rgb,
    /// Numbers, status codes, literals
    pub number: Rgb,
    /// HTTP methods
    pub keyword: Rgb,
    /// Everything else
    pub plain: Rgb,
}

/// GitHub dark palette
pub const GITHUB_THEME: Theme = Theme {
    name: Rgb::from_hex(0x007e_e787),
    string: Rgb::from_hex(0x0079_c0ff),
    number: Rgb::from_hex(0x0079_c0ff),
    keyword: Rgb::from_hex(0x00ff_7b72),
    plain: Rgb::from_hex(0x00c9_d1d9),
};

/// Highlight `source` as `language` with the GitHub theme
#[must_use]
pub fn highlight(source: &str, language: Language) -> String {
    highlight_with(source, language, &GITHUB_THEME)
}

/// Highlight `source` as `language` with an explicit theme
#[must_use]
pub fn highlight_with(source: &str, language: Language, theme: &Theme) -> String {
    match language {
        Language::Http => highlight_http(source, theme),
        Language::Json => highlight_json(source, theme),
        Language::Text => paint(source, theme.plain),
    }
}

fn paint(text: &str, color: Rgb) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.truecolor(color.0, color.1, color.2).to_string()
}

/// Accumulates unstyled runs so they are painted once
struct Painter<'t> {
    theme: &'t Theme,
    out: String,
    plain: String,
}

impl<'t> Painter<'t> {
    fn new(theme: &'t Theme, capacity: usize) -> Self {
        Self {
            theme,
            out: String::with_capacity(capacity),
            plain: String::new(),
        }
    }

    fn plain(&mut self, text: &str) {
        self.plain.push_str(text);
    }

    fn styled(&mut self, text: &str, color: Rgb) {
        self.flush();
        self.out.push_str(&paint(text, color));
    }

    fn flush(&mut self) {
        if !self.plain.is_empty() {
            self.out.push_str(&paint(&self.plain, self.theme.plain));
            self.plain.clear();
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.out
    }
}

fn highlight_json(source: &str, theme: &Theme) -> String {
    let mut painter = Painter::new(theme, source.len());
    let mut rest = source;

    while let Some(ch) = rest.chars().next() {
        let len = match ch {
            '"' => string_len(rest),
            '-' | '0'..='9' => ascii_run_len(rest, |b| {
                b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')
            }),
            c if c.is_ascii_alphabetic() => ascii_run_len(rest, |b| b.is_ascii_alphanumeric()),
            c => c.len_utf8(),
        };
        let (token, tail) = rest.split_at(len);

        match ch {
            '"' if tail.trim_start().starts_with(':') => painter.styled(token, theme.name),
            '"' => painter.styled(token, theme.string),
            '0'..='9' => painter.styled(token, theme.number),
            '-' if token.len() > 1 => painter.styled(token, theme.number),
            _ if matches!(token, "true" | "false" | "null") => {
                painter.styled(token, theme.number);
            }
            // punctuation, whitespace and illegal tokens
            _ => painter.plain(token),
        }
        rest = tail;
    }

    painter.finish()
}

/// Length of a JSON string token starting at `rest[0] == '"'`, including
/// both quotes. Unterminated strings run to the end of input.
fn string_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Length of the leading ASCII run accepted by `accept`; at least one char
fn ascii_run_len(rest: &str, accept: impl Fn(u8) -> bool) -> usize {
    let run = rest
        .as_bytes()
        .iter()
        .skip(1)
        .take_while(|&&b| accept(b))
        .count();
    1 + run
}

fn highlight_http(source: &str, theme: &Theme) -> String {
    let (head, body) = match source.split_once("\n\n") {
        Some((head, body)) => (head, Some(body)),
        None => (source, None),
    };

    let mut painter = Painter::new(theme, source.len());
    for (index, line) in head.split('\n').enumerate() {
        if index > 0 {
            painter.plain("\n");
        }
        if index == 0 {
            start_line(&mut painter, line);
        } else {
            header_line(&mut painter, line);
        }
    }
    let mut out = painter.finish();

    if let Some(body) = body {
        out.push_str("\n\n");
        out.push_str(&highlight_body(body, theme));
    }
    out
}

fn start_line(painter: &mut Painter<'_>, line: &str) {
    let theme = *painter.theme;
    let mut parts = line.splitn(3, ' ');
    let colors = if line.starts_with("HTTP/") {
        [theme.name, theme.number, theme.plain]
    } else {
        [theme.keyword, theme.string, theme.name]
    };

    for (index, color) in colors.into_iter().enumerate() {
        let Some(part) = parts.next() else { break };
        if index > 0 {
            painter.plain(" ");
        }
        painter.styled(part, color);
    }
}

fn header_line(painter: &mut Painter<'_>, line: &str) {
    match line.split_once(':') {
        Some((name, value)) if !name.is_empty() && !name.contains(' ') => {
            let theme = *painter.theme;
            painter.styled(name, theme.name);
            painter.plain(":");
            painter.plain(value);
        }
        _ => painter.plain(line),
    }
}

fn highlight_body(body: &str, theme: &Theme) -> String {
    let trimmed = body.trim_start();
    let looks_structured = trimmed.starts_with('{') || trimmed.starts_with('[');
    if looks_structured && serde_json::from_str::<serde_json::Value>(body).is_ok() {
        highlight_json(body, theme)
    } else {
        paint(body, theme.plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::plain_output;

    #[test]
    fn test_plain_json_round_trips_text() {
        plain_output();
        let source = "{\n  \"id\": 1,\n  \"ok\": true,\n  \"name\": \"x\"\n}";
        assert_eq!(highlight(source, Language::Json), source);
    }

    #[test]
    fn test_illegal_json_tokens_pass_through() {
        plain_output();
        let source = "{ id: @@@, \"unterminated";
        assert_eq!(highlight(source, Language::Json), source);
    }

    #[test]
    fn test_http_message_keeps_layout() {
        plain_output();
        let source = "GET https://example.com HTTP/1.1\naccept: */*\n\n{\"a\": 1}";
        assert_eq!(highlight(source, Language::Http), source);
    }

    #[test]
    fn test_http_non_json_body_is_untouched() {
        plain_output();
        let source = "HTTP/1.1 200 OK\ncontent-type: text/plain\n\n<html>{oops";
        assert_eq!(highlight(source, Language::Http), source);
    }

    #[test]
    fn test_text_is_untouched() {
        plain_output();
        assert_eq!(highlight("data: hello\n\n", Language::Text), "data: hello\n\n");
    }

    #[test]
    fn test_multibyte_input_does_not_split_chars() {
        plain_output();
        let source = "{\"emoji\": \"✔ done\", ✕: 1}";
        assert_eq!(highlight(source, Language::Json), source);
    }

    #[test]
    fn test_string_len_handles_escapes() {
        assert_eq!(string_len(r#""a\"b" rest"#), 6);
        assert_eq!(string_len(r#""open"#), 5);
    }

    #[test]
    fn test_theme_from_hex() {
        assert_eq!(GITHUB_THEME.keyword, Rgb(0xff, 0x7b, 0x72));
    }
}
