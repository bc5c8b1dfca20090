//! Get command arguments

use clap::Parser;

use super::common::OutputFormat;

/// Arguments for 'get' subcommand
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Record AT-URI (at://repo/collection/rkey) or shorthand (collection/rkey)
    pub uri: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
