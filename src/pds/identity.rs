//! Handle and DID resolution
//!
//! Unauthenticated reads with `-r` need to find the repo's PDS before any
//! record call: handle -> DID via the public AppView, DID -> PDS endpoint
//! via its DID document (plc.directory for did:plc, .well-known for did:web).

use log::debug;
use serde::Deserialize;

use crate::config::api;
use crate::error::{PdsError, Result};

/// DID document service entry
#[derive(Deserialize, Debug)]
struct DidDocService {
    id: String,
    #[serde(rename = "type")]
    service_type: String,
    #[serde(rename = "serviceEndpoint")]
    service_endpoint: String,
}

/// The parts of a DID document we care about
#[derive(Deserialize, Debug)]
struct DidDocument {
    #[serde(default)]
    service: Vec<DidDocService>,
}

#[derive(Deserialize, Debug)]
struct ResolveHandleResponse {
    did: String,
}

/// Resolver for handles and DID documents
pub struct IdentityResolver {
    client: reqwest::Client,
    appview_url: String,
    plc_url: String,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            appview_url: api::PUBLIC_API_URL.to_string(),
            plc_url: api::PLC_DIRECTORY_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_urls(appview_url: &str, plc_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            appview_url: appview_url.trim_end_matches('/').to_string(),
            plc_url: plc_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a handle (e.g. `alice.bsky.social`) to a DID
    pub async fn resolve_handle(&self, handle: &str) -> Result<String> {
        let url = format!(
            "{}{}/{}?handle={}",
            self.appview_url,
            api::XRPC_PATH,
            api::RESOLVE_HANDLE,
            urlencoding::encode(handle)
        );
        debug!("Resolving handle via: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(PdsError::Identity(format!(
                "could not resolve handle: {}",
                handle
            )));
        }

        let resolved: ResolveHandleResponse = response.json().await?;
        debug!("Handle {} -> {}", handle, resolved.did);
        Ok(resolved.did)
    }

    /// Resolve a repo argument (handle or DID) to a DID
    pub async fn resolve_repo_to_did(&self, repo: &str) -> Result<String> {
        if repo.starts_with("did:") {
            Ok(repo.to_string())
        } else {
            self.resolve_handle(repo).await
        }
    }

    /// Discover the PDS URL for a repo (handle or DID)
    pub async fn discover_pds(&self, repo: &str) -> Result<String> {
        let did = self.resolve_repo_to_did(repo).await?;
        self.resolve_did_to_pds(&did).await
    }

    /// Resolve a DID to its PDS endpoint via the DID document
    pub async fn resolve_did_to_pds(&self, did: &str) -> Result<String> {
        let doc_url = if did.starts_with("did:plc:") {
            format!("{}/{}", self.plc_url, did)
        } else if let Some(domain) = did.strip_prefix("did:web:") {
            // Only bare-domain did:web is supported; path-based DIDs are rare
            // for PDS hosts and percent-encode their colons.
            format!("https://{}/.well-known/did.json", domain)
        } else {
            return Err(PdsError::Identity(format!(
                "unsupported DID method: {}",
                did
            )));
        };

        debug!("Fetching DID document from: {}", doc_url);
        let response = self.client.get(&doc_url).send().await?;
        if !response.status().is_success() {
            return Err(PdsError::Identity(format!(
                "could not fetch DID document for: {}",
                did
            )));
        }

        let doc: DidDocument = response.json().await?;
        doc.service
            .iter()
            .find(|s| {
                s.id.ends_with("#atproto_pds") || s.service_type == "AtprotoPersonalDataServer"
            })
            .map(|s| s.service_endpoint.trim_end_matches('/').to_string())
            .ok_or_else(|| PdsError::Identity(format!("no PDS endpoint found for: {}", did)))
    }
}
