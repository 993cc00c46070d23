//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod config_cmd;
pub mod show;
pub mod system;
pub mod util;
pub mod vlan;

use ucsm_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &mut Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Vlan(args) => vlan::handle(controller, args, global).await,
        Command::Show(args) => show::handle(controller, args, global).await,
        // System, Config and Completions are handled before dispatch
        Command::System | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
