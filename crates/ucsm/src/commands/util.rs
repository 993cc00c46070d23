//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};

use crate::error::CliError;

/// Prompt for a yes/no answer on the terminal. Defaults to "no".
pub fn confirm(message: &str) -> Result<bool, dialoguer::Error> {
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
}

/// Fail with a usage error when a prompt would be needed but stdin is not
/// a terminal and `--yes` was not given.
pub fn require_interactive(action: &str, yes_flag: bool) -> Result<(), CliError> {
    if yes_flag || io::stdin().is_terminal() {
        return Ok(());
    }
    Err(CliError::NonInteractiveRequiresYes {
        action: action.into(),
    })
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
