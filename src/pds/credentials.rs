//! Credential resolution from CLI flags and environment

use log::debug;

use crate::config::credentials;
use crate::error::{PdsError, Result};

/// Resolved handle + app password pair
#[derive(Debug, Clone)]
pub struct Credentials {
    pub handle: String,
    pub password: String,
}

/// Credential resolution with fallback:
/// 1. CLI arguments (if provided)
/// 2. ATPROTO_HANDLE / ATPROTO_PASSWORD environment variables
///
/// There is deliberately no credentials file - app passwords stay in the
/// environment or the invocation.
pub fn resolve_credentials(
    cli_handle: Option<&str>,
    cli_password: Option<&str>,
) -> Result<Credentials> {
    let handle = match cli_handle {
        Some(handle) => {
            debug!("Using handle from CLI argument");
            handle.to_string()
        }
        None => match std::env::var(credentials::HANDLE_ENV_VAR) {
            Ok(handle) if !handle.is_empty() => {
                debug!("Using handle from {}", credentials::HANDLE_ENV_VAR);
                handle
            }
            _ => return Err(credentials_not_found()),
        },
    };

    let password = match cli_password {
        Some(password) => password.to_string(),
        None => match std::env::var(credentials::PASSWORD_ENV_VAR) {
            Ok(password) if !password.is_empty() => {
                debug!("Using password from {}", credentials::PASSWORD_ENV_VAR);
                password
            }
            _ => return Err(credentials_not_found()),
        },
    };

    Ok(Credentials { handle, password })
}

fn credentials_not_found() -> PdsError {
    PdsError::Auth(format!(
        "no credentials: provide --handle/--password or set {}/{}",
        credentials::HANDLE_ENV_VAR,
        credentials::PASSWORD_ENV_VAR
    ))
}

/// Resolve the PDS URL override: CLI flag wins, then ATPROTO_PDS_URL.
///
/// `None` means the caller should discover the PDS from the identity.
pub fn resolve_pds_override(cli_pds: Option<&str>) -> Option<String> {
    if let Some(url) = cli_pds {
        debug!("Using PDS URL from CLI argument");
        return Some(url.to_string());
    }
    match std::env::var(credentials::PDS_URL_ENV_VAR) {
        Ok(url) if !url.is_empty() => {
            debug!("Using PDS URL from {}", credentials::PDS_URL_ENV_VAR);
            Some(url)
        }
        _ => None,
    }
}
