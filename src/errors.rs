use std::error::Error as _;

/// Status code reported by the transport error kinds
pub const TRANSPORT_ERROR_STATUS: u16 = 500;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The resource was reached but the exchange failed (server hung up, broken response) or
    /// it did not answer within the configured timeout. Known as `RequestedResourceError`.
    #[error("{message}")]
    RequestedResource { message: String, status_code: u16 },

    /// The resource could not be reached at all (DNS failure, refused connection, no route).
    #[error("{message}")]
    NoNetworkConnection { message: String, status_code: u16 },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RequestError {
    pub fn requested_resource<S: Into<String>>(message: S) -> Self {
        RequestError::RequestedResource {
            message: message.into(),
            status_code: TRANSPORT_ERROR_STATUS,
        }
    }

    pub fn no_network_connection<S: Into<String>>(message: S) -> Self {
        RequestError::NoNetworkConnection {
            message: message.into(),
            status_code: TRANSPORT_ERROR_STATUS,
        }
    }

    /// Error for a request that outlived the configured timeout
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::requested_resource(format!(
            "Timeout error. The requested resource took a very long time to respond. Timeout = {timeout_seconds} sec."
        ))
    }

    /// Maps a failure of the HTTP client onto one of the error kinds. Timeouts are checked
    /// first, so a connect that times out is still reported as a timeout.
    pub(crate) fn from_transport(err: reqwest::Error, timeout_seconds: u64) -> Self {
        if err.is_timeout() {
            Self::timeout(timeout_seconds)
        } else if err.is_builder() {
            RequestError::InvalidRequest(describe(&err))
        } else if err.is_connect() {
            Self::no_network_connection(describe(&err))
        } else {
            Self::requested_resource(describe(&err))
        }
    }

    /// Status code carried by the transport error kinds
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::RequestedResource { status_code, .. }
            | RequestError::NoNetworkConnection { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RequestError::RequestedResource { message, .. }
            | RequestError::NoNetworkConnection { message, .. } => message.clone(),
            RequestError::Decode(e) => e.to_string(),
            RequestError::InvalidRequest(msg) => msg.clone(),
        }
    }
}

// reqwest keeps the interesting part (refused, reset, dns) in the source chain
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
