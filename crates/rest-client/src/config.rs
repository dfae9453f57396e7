//! Client configuration and credential resolution.

use std::collections::BTreeMap;
use std::time::Duration;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the credential reaches the target API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// The API needs no credential.
    None,
    /// `Authorization: Bearer <credential>`
    Bearer,
    /// Credential appended as a query parameter, e.g. `?key=<credential>`
    QueryParam(String),
}

impl AuthMode {
    pub fn requires_credential(&self) -> bool {
        !matches!(self, AuthMode::None)
    }
}

/// Settings for one [`RestClient`](crate::RestClient).
///
/// Built with the `with_*` methods, then handed to
/// [`RestClient::configure`](crate::RestClient::configure), which owns it from
/// then on.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    default_headers: BTreeMap<String, String>,
    timeout: Duration,
    credential: Option<String>,
    auth: AuthMode,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: BTreeMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credential: None,
            auth: AuthMode::None,
        }
    }

    pub fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_secs(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }

    /// Add a header sent with every request. A later value for the same name
    /// replaces the earlier one.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn auth(&self) -> &AuthMode {
        &self.auth
    }

    /// The credential, if one was supplied and is non-empty
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Resolve a credential from an explicit override or an environment variable.
///
/// A non-empty override wins; otherwise the variable's value is used if it is
/// set and non-empty.
pub fn resolve_credential(override_value: Option<&str>, env_var: &str) -> Option<String> {
    pick_credential(override_value, std::env::var(env_var).ok())
}

fn pick_credential(override_value: Option<&str>, env_value: Option<String>) -> Option<String> {
    let non_empty = |value: &str| !value.trim().is_empty();

    override_value
        .filter(|v| non_empty(v))
        .map(str::to_string)
        .or_else(|| env_value.filter(|v| non_empty(v)))
}
