//! Blob upload command arguments

use clap::Parser;
use std::path::PathBuf;

/// Arguments for 'upload-blob' subcommand
#[derive(Parser, Debug)]
pub struct UploadBlobArgs {
    /// Path to the file to upload (image, video, etc.)
    pub file_path: PathBuf,
}
