pub mod client;
pub mod credentials;
pub mod identity;
pub mod records;
pub mod session;
pub mod uri;

pub use client::PdsClient;
pub use credentials::{resolve_credentials, resolve_pds_override, Credentials};
pub use identity::IdentityResolver;
pub use session::Session;
pub use uri::AtUri;
