//! pdsctl - Work with records on an AT Protocol Personal Data Server
//!
//! A CLI tool to list, inspect, create, update and delete repository
//! records over the com.atproto.repo XRPC API.
//!
//! # Features
//!
//! - Cursor-driven pagination with resumable listings
//! - Unix-style verb aliases (ls, cat, touch, edit, rm)
//! - Multiple output formats (compact, table, JSON, YAML)
//! - Machine-safe stdout: structured formats emit nothing but the payload
//! - Bounded-concurrency batch writes fed from the command line or stdin
//! - Unauthenticated reads of any public repo via --repo
//!
//! # Example
//!
//! ```bash
//! # List your posts
//! pdsctl ls app.bsky.feed.post
//!
//! # Read anyone's posts, no credentials needed
//! pdsctl -r somebody.bsky.social ls app.bsky.feed.post -o json
//!
//! # Resume a listing from where it stopped
//! pdsctl ls app.bsky.feed.post --limit 200 --cursor TOKEN
//!
//! # Bulk delete likes from a pipe
//! pdsctl ls app.bsky.feed.like -o json | jq -r '.[].uri' | pdsctl rm --yes
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pds;
pub mod ui;

pub use batch::{run_batch, BatchOutcome, BatchResult};
pub use cli::{Cli, Command, OutputFormat};
pub use error::{PdsError, Result};
pub use pds::records::commands::{
    run_create, run_delete, run_get, run_list, run_update, run_upload_blob,
};
pub use pds::records::{list_collection, ContinuationInfo, ListedRecord};
pub use pds::{AtUri, IdentityResolver, PdsClient, Session};
