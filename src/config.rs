//! Request configuration.
//!
//! `RequestConfig` controls how a [`BaseRequest`](crate::net::BaseRequest) talks to the
//! network. Every call made through a `BaseRequest` opens its own session, and each session is
//! built from this configuration.
//!
//! `RequestConfig` provides defaults via [`Default`] and a fluent [`RequestConfig::builder()`]
//! for customization with validation.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use base_request::config::RequestConfig;
//! let cfg = RequestConfig::default();
//! assert_eq!(cfg.timeout_seconds, 5);
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use base_request::config::RequestConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = RequestConfig::builder()
//!     .timeout_seconds(10)
//!     .user_agent("Gosub/0.1")
//!     .max_redirects(3)
//!     .build()?; // returns Result<RequestConfig, RequestConfigError>
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `timeout_seconds`: Total time a single request may take, body included (default: 5).
//! - `user_agent`: Optional UA string to send with requests (default: [`DEFAULT_USER_AGENT`]).
//! - `max_redirects`: How many redirects are followed before giving up (default: 10).
//!
//! # Errors
//!
//! Builder validation can return [`RequestConfigError`] if values are invalid
//! (`timeout_seconds == 0` or an empty user agent).

use std::fmt;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default timeout for a single request, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
    pub max_redirects: usize,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            max_redirects: 10,
        }
    }
}

impl RequestConfig {
    pub fn builder() -> RequestConfigBuilder {
        RequestConfigBuilder::default()
    }

    /// Timeout as a duration, ready to hand to the HTTP client
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Builder for [`RequestConfig`].
#[derive(Debug, Clone, Default)]
pub struct RequestConfigBuilder {
    inner: RequestConfig,
}

impl RequestConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut RequestConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn timeout_seconds(self, secs: u64) -> Self { self.map(|c| c.timeout_seconds = secs) }
    pub fn user_agent<S: Into<String>>(self, ua: S) -> Self { self.map(|c| c.user_agent = Some(ua.into())) }
    pub fn no_user_agent(self) -> Self { self.map(|c| c.user_agent = None) }
    pub fn max_redirects(self, n: usize) -> Self { self.map(|c| c.max_redirects = n) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut RequestConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<RequestConfig, RequestConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestConfigError {
    ZeroTimeout,
    EmptyUserAgent,
}

impl fmt::Display for RequestConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestConfigError::ZeroTimeout => write!(f, "timeout_seconds must be at least 1"),
            RequestConfigError::EmptyUserAgent => write!(f, "user_agent must not be empty"),
        }
    }
}
impl std::error::Error for RequestConfigError {}

fn validate(c: &RequestConfig) -> Result<(), RequestConfigError> {
    if c.timeout_seconds == 0 {
        return Err(RequestConfigError::ZeroTimeout);
    }
    if c.user_agent.as_deref().is_some_and(|ua| ua.trim().is_empty()) {
        return Err(RequestConfigError::EmptyUserAgent);
    }
    Ok(())
}
