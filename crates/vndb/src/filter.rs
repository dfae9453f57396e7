//! Filter expressions for ad-hoc queries.
//!
//! Two input forms are accepted:
//! - a JSON filter, recognised by the presence of `[`, e.g.
//!   `["and", ["lang", "=", "en"], ["rating", ">", 80]]`
//! - `key:value`, shorthand for `["key", "=", "value"]`

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter JSON '{input}': {source}")]
    InvalidJson {
        input: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid filter format '{0}', use 'key:value' or a JSON array")]
    InvalidFormat(String),
}

pub fn parse_filters(input: &str) -> Result<Value, FilterError> {
    if input.contains('[') {
        return serde_json::from_str(input).map_err(|source| FilterError::InvalidJson {
            input: input.to_string(),
            source,
        });
    }

    match input.split_once(':') {
        Some((key, value)) => Ok(json!([key.trim(), "=", value.trim()])),
        None => Err(FilterError::InvalidFormat(input.to_string())),
    }
}
