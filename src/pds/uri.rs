//! AT-URI parsing

use std::fmt;

use crate::error::{PdsError, Result};

/// Parsed components of an AT-URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtUri {
    pub repo: String,
    pub collection: String,
    pub rkey: String,
}

impl AtUri {
    /// Parse a full AT-URI (`at://repo/collection/rkey`) or shorthand
    /// (`collection/rkey`, resolved against `default_repo`).
    pub fn parse(uri: &str, default_repo: Option<&str>) -> Result<Self> {
        let without_prefix = uri.strip_prefix("at://").unwrap_or(uri);
        let parts: Vec<&str> = without_prefix.split('/').collect();

        match parts.as_slice() {
            [collection, rkey] => {
                let repo = default_repo.ok_or_else(|| {
                    PdsError::InvalidArgument(format!(
                        "shorthand URI '{}' requires authentication or --repo",
                        uri
                    ))
                })?;
                Ok(Self {
                    repo: repo.to_string(),
                    collection: collection.to_string(),
                    rkey: rkey.to_string(),
                })
            }
            [repo, collection, rkey] => Ok(Self {
                repo: repo.to_string(),
                collection: collection.to_string(),
                rkey: rkey.to_string(),
            }),
            _ => Err(PdsError::InvalidArgument(format!(
                "invalid AT-URI format: {}",
                uri
            ))),
        }
    }
}

impl fmt::Display for AtUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at://{}/{}/{}", self.repo, self.collection, self.rkey)
    }
}

/// Extract the record key from a full AT-URI for compact display
pub fn rkey_of(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}
