//! System command handlers.

use crate::error::CliError;

pub fn handle() -> Result<(), CliError> {
    Err(CliError::NotYetImplemented {
        feature: "system".into(),
    })
}
