//! Session creation against the PDS

use log::{debug, info};
use serde::Deserialize;

use crate::config::api;
use crate::error::Result;
use crate::pds::PdsClient;

/// Authenticated session state
#[derive(Deserialize, Debug, Clone)]
pub struct Session {
    pub did: String,
    pub handle: String,
    #[serde(rename = "accessJwt")]
    pub access_jwt: String,
}

impl PdsClient {
    /// Authenticate with handle + app password and attach the session.
    ///
    /// Returns the DID the PDS resolved for the account.
    pub async fn login(&mut self, identifier: &str, password: &str) -> Result<String> {
        debug!("Creating session for {}", identifier);

        let response = self
            .xrpc_post(api::CREATE_SESSION)
            .json(&serde_json::json!({
                "identifier": identifier,
                "password": password,
            }))
            .send()
            .await?;

        let session: Session = self
            .parse_api_response(response, &format!("authenticate as '{}'", identifier))
            .await?;

        info!("Authenticated as {} ({})", session.handle, session.did);
        let did = session.did.clone();
        self.set_session(session);
        Ok(did)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdsError;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_login_success() {
        let mock_server = MockServer::start().await;
        let mut client = PdsClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/xrpc/com.atproto.server.createSession"))
            .and(body_json(serde_json::json!({
                "identifier": "me.bsky.social",
                "password": "xxxx-xxxx"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "did": "did:plc:abc123",
                "handle": "me.bsky.social",
                "accessJwt": "jwt-token",
                "refreshJwt": "refresh-token"
            })))
            .mount(&mock_server)
            .await;

        let did = client.login("me.bsky.social", "xxxx-xxxx").await.unwrap();
        assert_eq!(did, "did:plc:abc123");

        let session = client.session().unwrap();
        assert_eq!(session.handle, "me.bsky.social");
        assert_eq!(session.access_jwt, "jwt-token");
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let mock_server = MockServer::start().await;
        let mut client = PdsClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/xrpc/com.atproto.server.createSession"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "AuthenticationRequired",
                "message": "Invalid identifier or password"
            })))
            .mount(&mock_server)
            .await;

        let result = client.login("me.bsky.social", "wrong").await;
        match result.unwrap_err() {
            PdsError::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("Invalid identifier"));
            }
            _ => panic!("Expected PdsError::Api"),
        }
        assert!(client.session().is_none());
    }
}
