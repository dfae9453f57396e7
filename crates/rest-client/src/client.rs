//! HTTP execution: request building, transport, response parsing.

use crate::config::{AuthMode, ClientConfig};
use crate::error::{ConfigError, RequestError};
use crate::request::{Method, Request};
use crate::response::Response;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

/// Authenticated client for one target API.
///
/// Each [`call`](RestClient::call) is a single at-most-once request; nothing
/// is retried or cached between calls.
#[derive(Debug)]
pub struct RestClient {
    client: Client,
    config: ClientConfig,
}

impl RestClient {
    /// Validate `config` and build the underlying HTTP client.
    ///
    /// Fails before any network activity when the auth mode needs a
    /// credential and none (or only whitespace) was supplied.
    pub fn configure(config: ClientConfig) -> Result<Self, ConfigError> {
        if config.auth().requires_credential() && config.credential().is_none() {
            return Err(ConfigError::MissingCredential);
        }

        Url::parse(config.base_url()).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.base_url().to_string(),
            message: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in config.default_headers() {
            let invalid = |message: String| ConfigError::InvalidHeader {
                name: name.clone(),
                message,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        // default_headers comes second so a configured User-Agent wins
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(ConfigError::Transport)?;

        debug!(
            base_url = config.base_url(),
            timeout_ms = config.timeout().as_millis() as u64,
            "REST client configured"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue `request` and parse the JSON body.
    pub async fn call(&self, request: &Request) -> Result<Response, RequestError> {
        let mut url = request.url(self.config.base_url())?;
        let credential = self
            .config
            .credential()
            .filter(|_| request.is_authenticated());

        if let (Some(credential), AuthMode::QueryParam(name)) = (credential, self.config.auth()) {
            url.query_pairs_mut().append_pair(name, credential);
        }

        // The URL may carry the credential, so only the path is logged
        debug!(method = %request.method(), path = request.path(), "Making API request");

        let mut builder = self
            .client
            .request(request.method().to_reqwest(), url)
            .header(ACCEPT, "application/json");

        if let (Some(credential), AuthMode::Bearer) = (credential, self.config.auth()) {
            builder = builder.bearer_auth(credential);
        }

        match (request.method(), request.json_body()) {
            (Method::Post, Some(body)) => builder = builder.json(body),
            (Method::Get, Some(_)) => {
                debug!(path = request.path(), "Ignoring JSON body on GET request");
            }
            _ => {}
        }

        let response = builder.send().await.map_err(|e| {
            warn!(path = request.path(), error = %e, "Request error");
            RequestError::network(e)
        })?;

        let status = response.status();

        if !status.is_success() {
            // The status is already known; a truncated error body must not hide it
            let body = response.text().await.unwrap_or_default();
            warn!(
                path = request.path(),
                status = status.as_u16(),
                "Request failed"
            );
            return Err(RequestError::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown status").to_string(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(RequestError::network)?;
        let body = parse_body(&bytes)?;
        debug!(path = request.path(), status = status.as_u16(), "Request successful");

        Ok(Response::new(status.as_u16(), body))
    }

    pub async fn get(&self, path: &str) -> Result<Response, RequestError> {
        self.call(&Request::get(path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Response, RequestError> {
        self.call(&Request::post(path, body)).await
    }
}

/// An empty 2xx body (e.g. 204) parses as `null`.
fn parse_body(bytes: &[u8]) -> Result<Value, RequestError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(bytes).map_err(|e| RequestError::Decode {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestErrorKind;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{any, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bearer_client(server: &MockServer) -> RestClient {
        RestClient::configure(
            ClientConfig::new(server.uri())
                .with_auth(AuthMode::Bearer)
                .with_credential(Some("abc".to_string())),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_parsed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v0/me"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 1, "username": "x"})),
            )
            .mount(&mock_server)
            .await;

        let client = bearer_client(&mock_server);
        let response = client.get("/v0/me").await.unwrap();

        assert_eq!(
            response,
            Response::new(200, json!({"id": 1, "username": "x"}))
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_network() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        for credential in [None, Some(String::new()), Some("  ".to_string())] {
            let result = RestClient::configure(
                ClientConfig::new(mock_server.uri())
                    .with_auth(AuthMode::QueryParam("key".to_string()))
                    .with_credential(credential),
            );
            assert!(matches!(result, Err(ConfigError::MissingCredential)));
        }

        let received = mock_server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_no_credential_needed_without_auth() {
        let client = RestClient::configure(ClientConfig::new("https://api.vndb.org/kana"));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_setup_is_config_error() {
        let result = RestClient::configure(ClientConfig::new("api.example.com/no-scheme"));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));

        let result = RestClient::configure(
            ClientConfig::new("https://api.example.com").with_header("Bad Header", "x"),
        );
        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
    }

    #[tokio::test]
    async fn test_http_error_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v0/subjects/0"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{\"title\":\"Not Found\"}"))
            .mount(&mock_server)
            .await;

        let client = bearer_client(&mock_server);
        let err = client.get("/v0/subjects/0").await.unwrap_err();

        match err {
            RequestError::HttpStatus { code, reason, body } => {
                assert_eq!(code, 404);
                assert_eq!(reason, "Not Found");
                assert!(body.contains("Not Found"));
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_keeps_server_code() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = bearer_client(&mock_server);
        let err = client.get("/anything").await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Promise 100 bytes, send 7, then stall
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial",
                )
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = RestClient::configure(
            ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_millis(500)),
        )
        .unwrap();

        let err = client.get("/v0/me").await.unwrap_err();
        assert_eq!(err.kind(), RequestErrorKind::HttpStatus);
        assert_eq!(err.status_code(), Some(500));

        server.abort();
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
            .mount(&mock_server)
            .await;

        let client = bearer_client(&mock_server);
        let err = client.get("/stats").await.unwrap_err();
        assert_eq!(err.kind(), RequestErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = bearer_client(&mock_server);
        let response = client.get("/v0/me").await.unwrap();
        assert_eq!(response.status_code(), 204);
        assert_eq!(response.body(), &Value::Null);
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = RestClient::configure(
            ClientConfig::new(mock_server.uri()).with_timeout(Duration::from_millis(1)),
        )
        .unwrap();

        let err = client.get("/slow").await.unwrap_err();
        assert_eq!(err.kind(), RequestErrorKind::Network);
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = RestClient::configure(
            ClientConfig::new("http://127.0.0.1:1").with_timeout_secs(5),
        )
        .unwrap();

        let err = client.get("/").await.unwrap_err();
        assert_eq!(err.kind(), RequestErrorKind::Network);
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v0/me"))
            .and(header("authorization", "Bearer abc"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = bearer_client(&mock_server);
        let response = client.get("/v0/me").await.unwrap();
        assert_eq!(response.u64_field("id"), Some(1));
    }

    #[tokio::test]
    async fn test_unauthenticated_request_skips_credential() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let client = bearer_client(&mock_server);
        client
            .call(&Request::get("/calendar").unauthenticated())
            .await
            .unwrap();

        let received = mock_server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_query_param_auth_and_empty_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/IPlayerService/GetSteamLevel/v1/"))
            .and(query_param("key", "secret"))
            .and(query_param("steamid", "7656"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"response": {"player_level": 12}})),
            )
            .mount(&mock_server)
            .await;

        let client = RestClient::configure(
            ClientConfig::new(mock_server.uri())
                .with_auth(AuthMode::QueryParam("key".to_string()))
                .with_credential(Some("secret".to_string())),
        )
        .unwrap();

        let request = Request::get("/IPlayerService/GetSteamLevel/v1/")
            .query("steamid", "7656")
            .query("relationship", "")
            .query_opt::<u32>("count", None);
        let response = client.call(&request).await.unwrap();
        assert_eq!(response.u64_field("response.player_level"), Some(12));

        let received = mock_server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), Some("steamid=7656&key=secret"));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v0/search/subjects"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"keyword": "Clannad", "limit": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 3})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = bearer_client(&mock_server);
        let response = client
            .post("/v0/search/subjects", json!({"keyword": "Clannad", "limit": 5}))
            .await
            .unwrap();
        assert_eq!(response.u64_field("total"), Some(3));
    }

    #[tokio::test]
    async fn test_default_headers_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .and(header("user-agent", "Bangumi-API-Example/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RestClient::configure(
            ClientConfig::new(mock_server.uri()).with_header("User-Agent", "Bangumi-API-Example/1.0"),
        )
        .unwrap();

        client.get("/").await.unwrap();
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"  \n").unwrap(), Value::Null);
        assert_eq!(parse_body(b"[1,2]").unwrap(), json!([1, 2]));
        assert!(parse_body(b"<html>").is_err());
    }
}
