//! Delete command arguments

use clap::Parser;

use crate::config::defaults;

/// Arguments for 'delete' subcommand
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Record AT-URI(s) to delete (reads one per line from stdin if omitted)
    pub uris: Vec<String>,

    /// Maximum concurrent operations for batch delete
    #[arg(long, default_value_t = defaults::CONCURRENCY, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: usize,

    /// Stop dispatching new operations after the first error
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Skip confirmation prompt for multi-record deletes
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}
