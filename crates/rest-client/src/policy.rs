//! Per-call-site choice between stopping and carrying on after a failure.

use crate::error::RequestError;
use tracing::warn;

/// What a caller does with a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Hand the error back; the caller aborts.
    Fatal,
    /// Log the error and continue with `None`.
    Advisory,
}

impl FailurePolicy {
    /// Apply this policy to the outcome of a call.
    pub fn apply<T>(
        self,
        context: &str,
        result: Result<T, RequestError>,
    ) -> Result<Option<T>, RequestError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => match self {
                FailurePolicy::Fatal => Err(err),
                FailurePolicy::Advisory => {
                    warn!(context = context, error = %err, "Request failed, continuing");
                    Ok(None)
                }
            },
        }
    }
}
