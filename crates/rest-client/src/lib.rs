//! Thin authenticated REST client.
//!
//! One [`RestClient`] per target API: it joins a configured base URL with a
//! request path, attaches the credential the way the API expects, and returns
//! the parsed JSON body or a typed [`RequestError`]. Every call is independent:
//! no retries, no caching.

pub mod client;
pub mod config;
pub mod error;
pub mod policy;
pub mod request;
pub mod response;

pub use client::RestClient;
pub use config::{resolve_credential, AuthMode, ClientConfig};
pub use error::{ConfigError, RequestError, RequestErrorKind};
pub use policy::FailurePolicy;
pub use request::{Method, Request};
pub use response::Response;
