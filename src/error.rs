use std::fmt;

/// Custom error type for PDS operations
#[derive(Debug)]
pub enum PdsError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// XRPC endpoint returned an error response
    Api { status: u16, message: String },
    /// Caller-supplied pagination cursor rejected by the PDS
    InvalidCursor(String),
    /// Bad CLI input (limit, concurrency, field syntax, URI shape)
    InvalidArgument(String),
    /// Authentication missing or rejected
    Auth(String),
    /// Handle or DID could not be resolved
    Identity(String),
    /// JSON parsing error
    Json(String),
    /// File or stream I/O error
    Io(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for PdsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdsError::Http(e) => write!(f, "HTTP request failed: {}", e),
            PdsError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            PdsError::InvalidCursor(msg) => write!(f, "invalid cursor: {}", msg),
            PdsError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            PdsError::Auth(msg) => write!(f, "{}", msg),
            PdsError::Identity(msg) => write!(f, "{}", msg),
            PdsError::Json(msg) => write!(f, "JSON error: {}", msg),
            PdsError::Io(msg) => write!(f, "{}", msg),
            PdsError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for PdsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PdsError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PdsError {
    fn from(err: reqwest::Error) -> Self {
        PdsError::Http(err)
    }
}

impl From<serde_json::Error> for PdsError {
    fn from(err: serde_json::Error) -> Self {
        PdsError::Json(err.to_string())
    }
}

impl From<std::io::Error> for PdsError {
    fn from(err: std::io::Error) -> Self {
        PdsError::Io(err.to_string())
    }
}

impl From<std::env::VarError> for PdsError {
    fn from(err: std::env::VarError) -> Self {
        PdsError::Config(err.to_string())
    }
}

/// Result type alias for PDS operations
pub type Result<T> = std::result::Result<T, PdsError>;
