//! Per-call request description and URL construction.

use crate::error::RequestError;
use reqwest::Url;
use serde_json::Value;
use std::fmt;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A single call against the configured API.
///
/// Query parameters keep insertion order. Parameters whose value is absent or
/// empty never reach the URL. Segments added with [`Request::segment`] are
/// percent-encoded, so a `/` or `?` inside a value stays inside its segment.
#[derive(Debug, Clone)]
pub struct Request {
    path: String,
    segments: Vec<String>,
    method: Method,
    query: Vec<(String, Option<String>)>,
    body: Option<Value>,
    authenticated: bool,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            segments: Vec::new(),
            method,
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).body(body)
    }

    /// Append one encoded path segment, e.g. a username
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), Some(value.to_string())));
        self
    }

    /// Add a query parameter that may be absent
    pub fn query_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.push((key.into(), value.map(|v| v.to_string())));
        self
    }

    /// JSON body; only sent for POST
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Send this request without the configured credential
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Query pairs that will actually be sent
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some((key.as_str(), v.as_str())),
            _ => None,
        })
    }

    /// Join `base_url` and the path with exactly one `/`, append the encoded
    /// segments, then the non-empty query parameters.
    pub fn url(&self, base_url: &str) -> Result<Url, RequestError> {
        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );

        let mut url = Url::parse(&joined).map_err(|e| RequestError::InvalidRequest {
            message: format!("cannot build URL from '{joined}': {e}"),
        })?;

        if !self.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| RequestError::InvalidRequest {
                    message: format!("cannot append path segments to '{joined}'"),
                })?
                .pop_if_empty()
                .extend(&self.segments);
        }

        let pairs: Vec<_> = self.query_pairs().collect();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }
}
