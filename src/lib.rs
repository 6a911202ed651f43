//! Minimal async HTTP request helper.
//!
//! [`BaseRequest`] issues single `GET` and `POST` calls bounded by a timeout. Each call runs in
//! its own short-lived session, and transport failures are reported as one of two error kinds
//! (see [`RequestError`]).
//!
//! ```no_run
//! use base_request::{BaseRequest, Headers, RequestError};
//!
//! async fn example() -> Result<(), RequestError> {
//!     let req = BaseRequest::new(5);
//!     let body = req.get("https://api.example.com/data", &Headers::new(), true).await?;
//!     println!("{:?}", body.as_json());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod net;

pub use config::RequestConfig;
pub use errors::RequestError;
pub use net::*;
