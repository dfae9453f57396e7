//! Error types for client construction and request execution.

use thiserror::Error;

/// Errors raised while constructing a [`RestClient`](crate::RestClient).
///
/// These are unrecoverable locally: the caller has to fix its setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a credential is required for this API but none was provided")]
    MissingCredential,

    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("invalid default header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Coarse classification of a [`RequestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    HttpStatus,
    Network,
    Decode,
    InvalidRequest,
}

/// Errors raised by a single call. Never retried by the client.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {code}: {reason}")]
    HttpStatus {
        code: u16,
        reason: String,
        /// Raw response body, often carrying the API's own error message
        body: String,
    },

    /// DNS, connection, TLS or timeout failure.
    #[error("network error: {message}")]
    Network { message: String, timed_out: bool },

    /// A 2xx response whose body is not valid JSON (or not the expected shape).
    #[error("failed to decode JSON response: {message}")]
    Decode { message: String },

    /// The path or query could not form a valid URL.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl RequestError {
    pub fn kind(&self) -> RequestErrorKind {
        match self {
            RequestError::HttpStatus { .. } => RequestErrorKind::HttpStatus,
            RequestError::Network { .. } => RequestErrorKind::Network,
            RequestError::Decode { .. } => RequestErrorKind::Decode,
            RequestError::InvalidRequest { .. } => RequestErrorKind::InvalidRequest,
        }
    }

    /// HTTP status code, for `HttpStatus` errors only
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Network { timed_out: true, .. })
    }

    pub(crate) fn network(err: reqwest::Error) -> Self {
        RequestError::Network {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}
