//! Scoped network sessions.
//!
//! A [`Session`] owns its own HTTP client and lives for exactly one call. Dropping the session
//! drops the client and every connection it pooled.

use std::collections::HashMap;
use std::fmt::Display;

use http::{HeaderMap, Method};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::config::RequestConfig;
use crate::errors::RequestError;
use crate::net::response::ResponseBody;

/// A unique identifier for a session, used to correlate log lines of a single call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything received for a single request
#[derive(Debug)]
pub(crate) struct Exchange {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub cookies: HashMap<String, String>,
    pub body: ResponseBody,
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    client: reqwest::Client,
    timeout_seconds: u64,
}

impl Session {
    /// Opens a session. The given headers are sent with every request made through it.
    pub fn open(config: &RequestConfig, headers: &HashMap<String, String>) -> Result<Self, RequestError> {
        let default_headers: HeaderMap = HeaderMap::try_from(headers)
            .map_err(|e| RequestError::InvalidRequest(format!("invalid header: {e}")))?;

        let redirect = match config.max_redirects {
            0 => reqwest::redirect::Policy::none(),
            n => reqwest::redirect::Policy::limited(n),
        };

        let mut builder = reqwest::Client::builder().redirect(redirect);
        // A zero timeout means the request is not bounded at all
        if config.timeout_seconds > 0 {
            builder = builder.timeout(config.timeout());
        }
        // A user agent passed in by the caller wins over the configured one
        if let Some(ua) = &config.user_agent {
            if !default_headers.contains_key(http::header::USER_AGENT) {
                builder = builder.user_agent(ua.as_str());
            }
        }
        builder = builder.default_headers(default_headers);

        let client = builder
            .build()
            .map_err(|e| RequestError::from_transport(e, config.timeout_seconds))?;

        let id = SessionId::new();
        log::debug!("Session[{}]: opened (timeout {}s)", id, config.timeout_seconds);

        Ok(Self {
            id,
            client,
            timeout_seconds: config.timeout_seconds,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Sends a single request and buffers the complete response. A form, when given, is sent
    /// url-encoded as the request body. With `decode_as_json` the raw body bytes are parsed as
    /// JSON, otherwise the body is decoded as text using the charset the server declared.
    pub(crate) async fn exchange(
        &self,
        method: Method,
        url: Url,
        form: Option<&HashMap<String, String>>,
        decode_as_json: bool,
    ) -> Result<Exchange, RequestError> {
        log::debug!("Session[{}]: {} {}", self.id, method, url);

        let mut request = self.client.request(method, url);
        if let Some(form) = form {
            request = request.form(form);
        }

        let res = request.send().await.map_err(|e| self.transport_error(e))?;

        let final_url = res.url().clone();
        let status = res.status().as_u16();

        // Collect all the headers we've received
        let headers = res
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();

        let cookies = res
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();

        // Note: does not deal with streaming
        let body = if decode_as_json {
            let bytes = res.bytes().await.map_err(|e| self.transport_error(e))?;
            log::debug!("Session[{}]: {} ({} bytes)", self.id, status, bytes.len());
            ResponseBody::from_json_bytes(&bytes)?
        } else {
            let text = res.text().await.map_err(|e| self.transport_error(e))?;
            log::debug!("Session[{}]: {} ({} chars)", self.id, status, text.chars().count());
            ResponseBody::Text(text)
        };

        Ok(Exchange {
            url: final_url,
            status,
            headers,
            cookies,
            body,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> RequestError {
        let mapped = RequestError::from_transport(err, self.timeout_seconds);
        log::warn!("Session[{}]: request failed: {}", self.id, mapped);
        mapped
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        log::debug!("Session[{}]: closed", self.id);
    }
}
