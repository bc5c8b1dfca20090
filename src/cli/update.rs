//! Update command arguments

use clap::Parser;

use crate::config::defaults;

/// Arguments for 'update' subcommand
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Record AT-URI (omit to read JSONL updates from stdin)
    pub uri: Option<String>,

    /// Fields to update as key=value pairs
    ///
    /// When neither uri nor fields are given, updates are read as JSONL
    /// from stdin; each object must carry a "uri" field alongside the
    /// fields to merge.
    #[arg(verbatim_doc_comment)]
    pub fields: Vec<String>,

    /// Maximum concurrent operations for batch update
    #[arg(long, default_value_t = defaults::CONCURRENCY, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: usize,

    /// Stop dispatching new operations after the first error
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
}
