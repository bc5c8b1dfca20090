//! XRPC HTTP client for PDS interactions

use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::api;
use crate::error::{PdsError, Result};
use crate::pds::session::Session;

/// Error body returned by XRPC endpoints
#[derive(Deserialize, Debug)]
struct XrpcErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// PDS API client
///
/// Holds the HTTP connection pool, the PDS base URL and (after `login`)
/// the session token. Shared read-only across concurrent batch operations;
/// nothing mutates it mid-batch.
pub struct PdsClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl PdsClient {
    /// Create a new client for the given PDS base URL
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            // TCP keepalive to maintain connections
            .tcp_keepalive(Duration::from_secs(60))
            // Timeouts
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    /// The PDS base URL (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach a session obtained out-of-band
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Current session, if authenticated
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Session required; error mirrors the credential help text
    pub fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or_else(|| {
            PdsError::Auth("not authenticated: this operation requires --handle/--password".into())
        })
    }

    /// Build the URL for an XRPC method
    pub(crate) fn xrpc_url(&self, method: &str) -> String {
        format!("{}{}/{}", self.base_url, api::XRPC_PATH, method)
    }

    /// Add auth header when a session is present
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session {
            Some(session) => {
                builder.header("Authorization", format!("Bearer {}", session.access_jwt))
            }
            None => builder,
        }
    }

    /// Create a GET request builder for an XRPC query, `params` appended verbatim
    pub(crate) fn xrpc_get(&self, method: &str, params: &str) -> reqwest::RequestBuilder {
        let url = if params.is_empty() {
            self.xrpc_url(method)
        } else {
            format!("{}?{}", self.xrpc_url(method), params)
        };
        debug!("GET {}", url);
        self.with_headers(self.client.get(url))
    }

    /// Create a POST request builder for an XRPC procedure
    pub(crate) fn xrpc_post(&self, method: &str) -> reqwest::RequestBuilder {
        let url = self.xrpc_url(method);
        debug!("POST {}", url);
        self.with_headers(self.client.post(url))
    }

    /// Parse an XRPC response, returning error for non-success status codes
    ///
    /// A 400 whose error body mentions the cursor is surfaced as
    /// `InvalidCursor` - stale or foreign cursors are user error, never
    /// silently recovered.
    pub(crate) async fn parse_api_response<T>(
        &self,
        response: reqwest::Response,
        error_context: &str,
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<XrpcErrorBody>().await {
                Ok(body) => {
                    let detail = body
                        .message
                        .or(body.error)
                        .unwrap_or_else(|| "unknown error".to_string());
                    format!("failed to {}: {}", error_context, detail)
                }
                Err(_) => format!("failed to {}", error_context),
            };

            if status.as_u16() == 400 && message.to_lowercase().contains("cursor") {
                return Err(PdsError::InvalidCursor(message));
            }
            return Err(PdsError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
impl PdsClient {
    /// Create a test client pointed at a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::new(base_url.to_string())
    }

    /// Create an authenticated test client with a fixed session
    pub fn test_client_with_session(base_url: &str) -> Self {
        let mut client = Self::new(base_url.to_string());
        client.set_session(Session {
            did: "did:plc:testuser".to_string(),
            handle: "test.bsky.social".to_string(),
            access_jwt: "test-jwt".to_string(),
        });
        client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_xrpc_url() {
        let client = PdsClient::new("https://pds.example.com".to_string());
        assert_eq!(
            client.xrpc_url("com.atproto.repo.listRecords"),
            "https://pds.example.com/xrpc/com.atproto.repo.listRecords"
        );
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let client = PdsClient::new("https://pds.example.com/".to_string());
        assert_eq!(client.base_url(), "https://pds.example.com");
        assert!(!client.xrpc_url("test").contains("//xrpc"));
    }

    #[test]
    fn test_require_session_unauthenticated() {
        let client = PdsClient::new("https://pds.example.com".to_string());
        assert!(client.session().is_none());
        match client.require_session() {
            Err(PdsError::Auth(msg)) => assert!(msg.contains("--handle")),
            _ => panic!("Expected PdsError::Auth"),
        }
    }

    #[tokio::test]
    async fn test_auth_header_sent_with_session() {
        let mock_server = MockServer::start().await;
        let client = PdsClient::test_client_with_session(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/xrpc/com.atproto.repo.getRecord"))
            .and(header("Authorization", "Bearer test-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&mock_server)
            .await;

        let response = client
            .xrpc_get("com.atproto.repo.getRecord", "")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn test_parse_api_response_error_body() {
        let mock_server = MockServer::start().await;
        let client = PdsClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/xrpc/com.atproto.repo.listRecords"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "AuthMissing",
                "message": "Authentication Required"
            })))
            .mount(&mock_server)
            .await;

        let response = client
            .xrpc_get("com.atproto.repo.listRecords", "")
            .send()
            .await
            .unwrap();
        let result: Result<serde_json::Value> =
            client.parse_api_response(response, "list records").await;

        match result.unwrap_err() {
            PdsError::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("Authentication Required"));
            }
            _ => panic!("Expected PdsError::Api"),
        }
    }

    #[tokio::test]
    async fn test_parse_api_response_invalid_cursor() {
        let mock_server = MockServer::start().await;
        let client = PdsClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/xrpc/com.atproto.repo.listRecords"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "InvalidRequest",
                "message": "Invalid cursor"
            })))
            .mount(&mock_server)
            .await;

        let response = client
            .xrpc_get("com.atproto.repo.listRecords", "")
            .send()
            .await
            .unwrap();
        let result: Result<serde_json::Value> =
            client.parse_api_response(response, "list records").await;

        match result.unwrap_err() {
            PdsError::InvalidCursor(msg) => assert!(msg.contains("Invalid cursor")),
            other => panic!("Expected PdsError::InvalidCursor, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_api_response_unparseable_error_body() {
        let mock_server = MockServer::start().await;
        let client = PdsClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/xrpc/com.atproto.repo.listRecords"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&mock_server)
            .await;

        let response = client
            .xrpc_get("com.atproto.repo.listRecords", "")
            .send()
            .await
            .unwrap();
        let result: Result<serde_json::Value> =
            client.parse_api_response(response, "list records").await;

        match result.unwrap_err() {
            PdsError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("list records"));
            }
            _ => panic!("Expected PdsError::Api"),
        }
    }
}
