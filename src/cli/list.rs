//! List command arguments

use clap::Parser;

use super::common::OutputFormat;
use crate::config::defaults;

/// Arguments for 'list' subcommand
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Collection name (e.g., app.bsky.feed.post)
    pub collection: String,

    /// Maximum number of records to fetch in total
    #[arg(long, default_value_t = defaults::LIST_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Pagination cursor from a previous response (replayed verbatim)
    #[arg(long)]
    pub cursor: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Compact)]
    pub output: OutputFormat,
}
