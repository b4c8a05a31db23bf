//! Typed views of protocol request/response objects
//!
//! Steps carry their request and response as free-form JSON. The renderer
//! reads them through these views according to the step type.

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value;

use super::ordered::OrderedMap;

/// Raw body bytes as emitted by the engine
///
/// The engine may send a plain string, an array of bytes, or a Node-style
/// buffer object (`{"type": "Buffer", "data": [..]}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Body {
    /// Already-decoded text
    Text(String),
    /// Buffer object wrapping the bytes
    Buffer {
        /// The raw bytes
        data: Vec<u8>,
    },
    /// Bare byte array
    Bytes(Vec<u8>),
}

impl Body {
    /// The raw bytes of the body
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Buffer { data } | Self::Bytes(data) => data,
        }
    }

    /// Decode the body as UTF-8, replacing invalid sequences
    #[must_use]
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

fn default_protocol() -> String {
    "HTTP/1.1".to_string()
}

/// HTTP request as sent by the engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HttpRequest {
    /// Request method
    #[serde(default)]
    pub method: String,
    /// Full request URL
    #[serde(default)]
    pub url: String,
    /// Protocol version
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Request headers
    #[serde(default)]
    pub headers: Option<OrderedMap<Value>>,
    /// Request body; only string bodies are displayed
    #[serde(default)]
    pub body: Option<Value>,
}

/// HTTP response as received by the engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// Protocol version
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Status code
    #[serde(default)]
    pub status: u16,
    /// Status reason phrase
    #[serde(default)]
    pub status_text: String,
    /// Response headers
    #[serde(default)]
    pub headers: Option<OrderedMap<Value>>,
    /// Content type reported by the engine
    #[serde(default)]
    pub content_type: Option<String>,
    /// Raw response body
    #[serde(default)]
    pub body: Body,
}

impl HttpResponse {
    /// Content type from the engine, falling back to the `Content-Type` header
    #[must_use]
    pub fn effective_content_type(&self) -> Option<&str> {
        self.content_type.as_deref().or_else(|| {
            self.headers
                .as_ref()
                .and_then(|headers| headers.get_ignore_case("content-type"))
                .and_then(Value::as_str)
        })
    }
}

/// Server-sent events response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SseResponse {
    /// Concatenated event stream
    #[serde(default)]
    pub body: Body,
}

/// gRPC response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GrpcResponse {
    /// Decoded response message(s)
    #[serde(default)]
    pub body: Value,
}
