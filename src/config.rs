/// Configuration constants for the XRPC API
pub mod api {
    /// Base path for XRPC endpoints
    pub const XRPC_PATH: &str = "/xrpc";

    /// Record listing endpoint
    pub const LIST_RECORDS: &str = "com.atproto.repo.listRecords";

    /// Single record fetch endpoint
    pub const GET_RECORD: &str = "com.atproto.repo.getRecord";

    /// Record creation endpoint
    pub const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

    /// Record replacement endpoint
    pub const PUT_RECORD: &str = "com.atproto.repo.putRecord";

    /// Record deletion endpoint
    pub const DELETE_RECORD: &str = "com.atproto.repo.deleteRecord";

    /// Blob upload endpoint
    pub const UPLOAD_BLOB: &str = "com.atproto.repo.uploadBlob";

    /// Session creation endpoint
    pub const CREATE_SESSION: &str = "com.atproto.server.createSession";

    /// Handle resolution endpoint
    pub const RESOLVE_HANDLE: &str = "com.atproto.identity.resolveHandle";

    /// Maximum page size accepted by listRecords
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// PLC directory used to resolve did:plc documents
    pub const PLC_DIRECTORY_URL: &str = "https://plc.directory";

    /// Public AppView used for unauthenticated handle resolution
    pub const PUBLIC_API_URL: &str = "https://public.api.bsky.app";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Environment variable for the account handle
    pub const HANDLE_ENV_VAR: &str = "ATPROTO_HANDLE";

    /// Environment variable for the app password
    pub const PASSWORD_ENV_VAR: &str = "ATPROTO_PASSWORD";

    /// Environment variable for a fixed PDS URL
    pub const PDS_URL_ENV_VAR: &str = "ATPROTO_PDS_URL";
}

/// Default values for CLI
pub mod defaults {
    /// Default total-record cap for `list`
    pub const LIST_LIMIT: u32 = 50;

    /// Default concurrent operations for batch commands
    pub const CONCURRENCY: usize = 10;

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
