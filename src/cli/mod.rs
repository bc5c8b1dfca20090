//! CLI argument parsing

mod common;
mod create;
mod delete;
mod fields;
mod get;
mod list;
mod stdin;
mod update;
mod upload;

use clap::{Parser, Subcommand};

use crate::config::defaults;

pub use common::OutputFormat;
pub use create::CreateArgs;
pub use delete::DeleteArgs;
pub use fields::parse_field_args;
pub use get::GetArgs;
pub use list::ListArgs;
pub use stdin::{read_records_from_stdin, read_updates_from_stdin, read_uris_from_stdin};
pub use update::UpdateArgs;
pub use upload::UploadBlobArgs;

/// pdsctl - AT Protocol record operations
#[derive(Parser, Debug)]
#[command(name = "pdsctl")]
#[command(version)]
#[command(about = "List, inspect and modify records on an AT Protocol PDS", long_about = None)]
#[command(after_help = "\
examples:
  # read anyone's posts (no auth needed)
  pdsctl -r zzstoatzz.io ls app.bsky.feed.post

  # continue from a cursor, machine-readable
  pdsctl -r did:plc:abc123 ls app.bsky.feed.post -o json --cursor TOKEN

  # create a record (requires auth)
  pdsctl --handle you.bsky.social create app.bsky.feed.post text=hello

  # bulk delete from a pipe
  pdsctl -r you.bsky.social ls app.bsky.feed.like -o json | jq -r '.[].uri' | pdsctl rm --yes

note: -r and auth flags go BEFORE the command")]
pub struct Cli {
    /// Read from another repo (handle or DID) - no auth needed for public data
    #[arg(short = 'r', long, global = true)]
    pub repo: Option<String>,

    /// Your handle, for authenticated operations
    #[arg(long, global = true)]
    pub handle: Option<String>,

    /// Your app password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// PDS URL (discovered from the handle or repo when not specified)
    #[arg(long, global = true)]
    pub pds: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List records in a collection
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Get a single record
    #[command(visible_alias = "cat")]
    Get(GetArgs),

    /// Create record(s)
    #[command(visible_alias = "touch", visible_alias = "add")]
    Create(CreateArgs),

    /// Update record(s) with a read-merge-write
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete record(s)
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Upload a blob (image, video, etc.) and print its reference
    UploadBlob(UploadBlobArgs),
}
