use std::collections::HashMap;

use http::Method;
use url::Url;

use crate::config::RequestConfig;
use crate::errors::RequestError;
use crate::net::response::{HttpResponse, ResponseBody};
use crate::net::session::{Exchange, Session};

/// Headers sent with a request, name to value
pub type Headers = HashMap<String, String>;

/// Form fields posted with a request, name to value
pub type FormData = HashMap<String, String>;

/// Base for issuing single GET/POST calls with a bounded lifetime.
///
/// A `BaseRequest` only holds configuration. Every call opens its own [`Session`] which is closed
/// again when the call returns, so one `BaseRequest` can be cloned or shared between any number
/// of concurrent calls.
///
/// Transport failures never escape as raw client errors. They are reported as
/// [`RequestError::RequestedResource`] (timeouts and failures after the server was reached) or
/// [`RequestError::NoNetworkConnection`] (the server could not be reached), both with status 500.
#[derive(Debug, Clone, Default)]
pub struct BaseRequest {
    config: RequestConfig,
}

impl BaseRequest {
    /// Creates a request base bounding every call to `timeout_seconds`. A timeout of 0 leaves
    /// calls unbounded. No I/O is done here.
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            config: RequestConfig {
                timeout_seconds,
                ..RequestConfig::default()
            },
        }
    }

    pub fn with_config(config: RequestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.config.timeout_seconds
    }

    /// GET `url` and return the decoded body. With `decode_as_json` the body is parsed as JSON
    /// whatever content type the server declared, otherwise the raw text is returned.
    pub async fn get(&self, url: &str, headers: &Headers, decode_as_json: bool) -> Result<ResponseBody, RequestError> {
        let exchange = self.exchange(Method::GET, url, headers, None, decode_as_json).await?;
        Ok(exchange.body)
    }

    /// POST `data` form-encoded to `url` and return the decoded body. Decoding works as in
    /// [`BaseRequest::get`].
    pub async fn post(
        &self,
        url: &str,
        headers: &Headers,
        data: &FormData,
        decode_as_json: bool,
    ) -> Result<ResponseBody, RequestError> {
        let exchange = self.exchange(Method::POST, url, headers, Some(data), decode_as_json).await?;
        Ok(exchange.body)
    }

    /// Like [`BaseRequest::get`], but returns status, headers and cookies along with the body.
    pub async fn get_response(
        &self,
        url: &str,
        headers: &Headers,
        decode_as_json: bool,
    ) -> Result<HttpResponse, RequestError> {
        let exchange = self.exchange(Method::GET, url, headers, None, decode_as_json).await?;
        Ok(into_response(exchange))
    }

    /// Like [`BaseRequest::post`], but returns status, headers and cookies along with the body.
    pub async fn post_response(
        &self,
        url: &str,
        headers: &Headers,
        data: &FormData,
        decode_as_json: bool,
    ) -> Result<HttpResponse, RequestError> {
        let exchange = self.exchange(Method::POST, url, headers, Some(data), decode_as_json).await?;
        Ok(into_response(exchange))
    }

    // The session is dropped when this returns, on the error paths as well
    async fn exchange(
        &self,
        method: Method,
        url: &str,
        headers: &Headers,
        form: Option<&FormData>,
        decode_as_json: bool,
    ) -> Result<Exchange, RequestError> {
        let url = Url::parse(url).map_err(|e| RequestError::InvalidRequest(format!("{url}: {e}")))?;

        let session = Session::open(&self.config, headers)?;
        session.exchange(method, url, form, decode_as_json).await
    }
}

fn into_response(exchange: Exchange) -> HttpResponse {
    HttpResponse {
        url: exchange.url,
        status: exchange.status,
        headers: exchange.headers,
        body: exchange.body,
        cookies: exchange.cookies,
    }
}
