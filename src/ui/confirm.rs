//! User confirmation prompts for destructive operations

use std::io::{self, IsTerminal};

use dialoguer::Confirm;
use log::warn;

/// Ask the user to confirm deleting `count` records.
///
/// Returns `true` if the deletion should proceed. With `assume_yes` the
/// prompt is skipped. Without a terminal on stdin (piped input, CI) the
/// prompt cannot be answered, so the operation is declined rather than
/// hanging.
pub fn confirm_deletion(count: usize, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    if !io::stdin().is_terminal() {
        warn!(
            "Refusing to delete {} record(s) without confirmation; pass --yes for non-interactive use",
            count
        );
        return false;
    }

    let noun = if count == 1 { "record" } else { "records" };
    Confirm::new()
        .with_prompt(format!("Delete {} {}?", count, noun))
        .default(false)
        .interact()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(confirm_deletion(5, true));
    }

    #[test]
    fn test_non_terminal_stdin_declines() {
        // Test harness stdin is not a terminal
        if !io::stdin().is_terminal() {
            assert!(!confirm_deletion(5, false));
        }
    }
}
