//! Response classification into typed success and error results.
//!
//! Classification never fails: every HTTP status, including 4xx/5xx, maps to
//! a normal [`ApiResponse`] value. Transport and pre-flight failures are the
//! only things surfaced as `Err` by the client.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// A single coded reason for a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorReason {
    /// Coded error reason, e.g. `authorization_error`
    pub code: String,
    /// Human readable error message
    pub message: String,
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct SuccessResponse {
    pub url: String,
    pub params: Value,
    pub http_code: StatusCode,
    pub http_message: String,
    /// Parsed response body, exposed unmodified. `Value::Null` when the body
    /// was empty or not JSON.
    pub body: Value,
}

impl SuccessResponse {
    /// The parsed response contents.
    pub fn contents(&self) -> &Value {
        &self.body
    }
}

/// A failed (non-2xx) response.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub url: String,
    pub params: Value,
    pub http_code: StatusCode,
    pub http_message: String,
    /// Structured reasons from the body's `errors` list; empty when the body
    /// carried none.
    pub reasons: Vec<ErrorReason>,
    /// Best-effort message extracted from a non-JSON body (e.g. an HTML
    /// error page). Structured `reasons` remain authoritative where present.
    pub fallback_message: Option<String>,
}

impl ErrorResponse {
    /// The structured reasons for the failure.
    pub fn errors(&self) -> &[ErrorReason] {
        &self.reasons
    }
}

/// The outcome of an API call: a parsed success or a structured failure.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl ApiResponse {
    /// Whether the response status was in the 2xx range.
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    /// The URL of the request.
    pub fn url(&self) -> &str {
        match self {
            ApiResponse::Success(r) => &r.url,
            ApiResponse::Error(r) => &r.url,
        }
    }

    /// The parameters the request was sent with (the wrapped body for write
    /// operations, the query mapping for reads).
    pub fn params(&self) -> &Value {
        match self {
            ApiResponse::Success(r) => &r.params,
            ApiResponse::Error(r) => &r.params,
        }
    }

    /// The HTTP response status code.
    pub fn http_code(&self) -> StatusCode {
        match self {
            ApiResponse::Success(r) => r.http_code,
            ApiResponse::Error(r) => r.http_code,
        }
    }

    /// The HTTP response status message.
    pub fn http_message(&self) -> &str {
        match self {
            ApiResponse::Success(r) => &r.http_message,
            ApiResponse::Error(r) => &r.http_message,
        }
    }

    /// The parsed body for a success; `None` for an error.
    pub fn contents(&self) -> Option<&Value> {
        match self {
            ApiResponse::Success(r) => Some(&r.body),
            ApiResponse::Error(_) => None,
        }
    }

    /// The structured failure reasons; empty for a success.
    pub fn errors(&self) -> &[ErrorReason] {
        match self {
            ApiResponse::Success(_) => &[],
            ApiResponse::Error(r) => &r.reasons,
        }
    }
}

/// Turn a raw HTTP response into an [`ApiResponse`].
pub(crate) fn classify(url: String, params: Value, status: StatusCode, body: &str) -> ApiResponse {
    let http_message = status.canonical_reason().unwrap_or_default().to_string();
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if status.is_success() {
        return ApiResponse::Success(SuccessResponse {
            url,
            params,
            http_code: status,
            http_message,
            body: parsed.unwrap_or(Value::Null),
        });
    }

    let (reasons, fallback_message) = match parsed {
        Some(json) => (extract_reasons(&json), None),
        None => {
            let stripped = strip_html_message(body);
            let fallback = if stripped.is_empty() {
                None
            } else {
                Some(stripped)
            };
            (Vec::new(), fallback)
        }
    };

    ApiResponse::Error(ErrorResponse {
        url,
        params,
        http_code: status,
        http_message,
        reasons,
        fallback_message,
    })
}

fn extract_reasons(body: &Value) -> Vec<ErrorReason> {
    let Some(list) = body.get("errors").and_then(Value::as_array) else {
        return Vec::new();
    };

    list.iter()
        .map(|rec| ErrorReason {
            code: rec
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            message: rec
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

/// Reduce a non-JSON error body (typically an HTML error page) to a single
/// informational line: keep only the `<body>` content, drop tags, collapse
/// whitespace and cap at 256 characters.
fn strip_html_message(body: &str) -> String {
    let content = isolate_body(body);

    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(256)
        .collect()
}

fn isolate_body(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let start = find_ignore_ascii_case(bytes, b"<body")
        .and_then(|open| raw[open..].find('>').map(|close| open + close + 1))
        .unwrap_or(0);
    let end = find_ignore_ascii_case(bytes, b"</body").unwrap_or(raw.len());
    if start <= end {
        &raw[start..end]
    } else {
        raw
    }
}

fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
