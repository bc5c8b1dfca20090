//! Create command arguments

use clap::Parser;

use crate::config::defaults;

/// Arguments for 'create' subcommand
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Collection name (e.g., app.bsky.feed.post)
    pub collection: String,

    /// Record fields as key=value pairs (e.g., text='hello')
    ///
    /// JSON is accepted for object/array values. When no fields are given,
    /// records are read as JSONL from stdin (one JSON object per line).
    #[arg(verbatim_doc_comment)]
    pub fields: Vec<String>,

    /// Maximum concurrent operations for batch create
    #[arg(long, default_value_t = defaults::CONCURRENCY, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: usize,

    /// Stop dispatching new operations after the first error
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
}
