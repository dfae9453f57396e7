//! Parsed response with typed field access.

use crate::error::RequestError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status code and parsed JSON body of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status_code: u16,
    body: Value,
}

impl Response {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Deserialize the body into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        T::deserialize(&self.body).map_err(|e| RequestError::Decode {
            message: e.to_string(),
        })
    }

    /// Look up a value by dotted path, e.g. `"response.players.0.steamid"`.
    ///
    /// Object segments match keys; array segments must be an index.
    pub fn field(&self, path: &str) -> Option<&Value> {
        lookup(&self.body, path)
    }

    pub fn str_field(&self, path: &str) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }

    pub fn u64_field(&self, path: &str) -> Option<u64> {
        self.field(path).and_then(Value::as_u64)
    }

    pub fn i64_field(&self, path: &str) -> Option<i64> {
        self.field(path).and_then(Value::as_i64)
    }

    pub fn f64_field(&self, path: &str) -> Option<f64> {
        self.field(path).and_then(Value::as_f64)
    }

    pub fn bool_field(&self, path: &str) -> Option<bool> {
        self.field(path).and_then(Value::as_bool)
    }

    pub fn array_field(&self, path: &str) -> Option<&Vec<Value>> {
        self.field(path).and_then(Value::as_array)
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }

    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn sample() -> Response {
        Response::new(
            200,
            json!({
                "response": {
                    "player_count": 812345,
                    "players": [
                        {"steamid": "76561197960361544", "personastate": 1, "visible": true}
                    ]
                },
                "rating": {"score": 8.4, "rank": -1}
            }),
        )
    }

    #[test]
    fn test_nested_lookup() {
        let response = sample();
        assert_eq!(response.u64_field("response.player_count"), Some(812345));
        assert_eq!(
            response.str_field("response.players.0.steamid"),
            Some("76561197960361544")
        );
        assert_eq!(response.bool_field("response.players.0.visible"), Some(true));
        assert_eq!(response.f64_field("rating.score"), Some(8.4));
        assert_eq!(response.i64_field("rating.rank"), Some(-1));
        assert_eq!(response.array_field("response.players").map(Vec::len), Some(1));
    }

    #[test]
    fn test_missing_or_mistyped_is_none() {
        let response = sample();
        assert_eq!(response.field("response.playre_count"), None);
        assert_eq!(response.field("response.players.3"), None);
        assert_eq!(response.field("response.players.first"), None);
        // present, but not a string
        assert_eq!(response.str_field("response.player_count"), None);
        assert_eq!(response.u64_field("rating.rank"), None);
    }

    #[test]
    fn test_empty_path_is_root() {
        let response = sample();
        assert_eq!(response.field(""), Some(response.body()));
    }

    #[test]
    fn test_decode() {
        #[derive(Debug, Deserialize)]
        struct Rating {
            score: f64,
        }

        #[derive(Debug, Deserialize)]
        struct Body {
            rating: Rating,
        }

        let body: Body = sample().decode().unwrap();
        assert_eq!(body.rating.score, 8.4);

        let err = sample().decode::<Vec<u32>>().unwrap_err();
        assert_eq!(err.kind(), crate::RequestErrorKind::Decode);
    }
}
