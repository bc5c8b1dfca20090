//! UI utilities for terminal output
//!
//! Progress indicators and confirmation prompts. Everything here draws on
//! stderr or the controlling terminal, never on stdout.

mod confirm;
mod spinner;

pub use confirm::confirm_deletion;
pub use spinner::{clear_spinner, create_progress, create_spinner, finish_spinner};
