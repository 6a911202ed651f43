//! HTTP response model.
//!
//! [`HttpResponse`] represents a **fully buffered** HTTP response as returned by
//! [`BaseRequest::get_response`](crate::net::BaseRequest::get_response) and
//! [`BaseRequest::post_response`](crate::net::BaseRequest::post_response). It contains the final
//! URL (after redirects), the status code, response headers, cookies and the decoded body.
//!
//! ## Notes
//! - The body is decoded up front into a [`ResponseBody`]: either JSON (decoded from the raw
//!   bytes, whatever the server put in `Content-Type`) or text (decoded with the charset from
//!   `Content-Type`, UTF-8 when none is declared). An empty or blank JSON body decodes to `null`.
//! - `headers` uses lowercase header names. When a header is repeated, the last value wins.
//! - `cookies` only holds name and value of each `Set-Cookie`, attributes are dropped.
//!
use std::collections::HashMap;

use serde::Serialize;

use crate::errors::RequestError;

/// Decoded body of a response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// Decodes raw body bytes as JSON. Never looks at the declared content type. A body with
    /// nothing but whitespace is `null`.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, RequestError> {
        let bytes = bytes.trim_ascii();
        if bytes.is_empty() {
            return Ok(ResponseBody::Json(serde_json::Value::Null));
        }

        Ok(ResponseBody::Json(serde_json::from_slice(bytes)?))
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }
}

/// Simple structure for HTTP responses.
///
/// All fields reflect the **received** response; only the body is decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    /// Final URL of the response (after redirects, if any).
    pub url: url::Url,

    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,

    /// Response headers keyed by lowercase name.
    pub headers: HashMap<String, String>,

    /// Decoded response body.
    pub body: ResponseBody,

    /// Cookies set by the response, name to value.
    pub cookies: HashMap<String, String>,
}

impl HttpResponse {
    /// Returns true for 2xx status codes
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}
