//! `vlan` handler: stage a move, show it, commit on confirmation.

use ucsm_core::{ChangeLog, CommitOutcome, Controller, CoreError, MoveRequest};

use crate::cli::{GlobalOpts, VlanArgs};
use crate::error::CliError;
use crate::output;

use super::show::VlanRow;
use super::util;

pub async fn handle(
    controller: &mut Controller,
    args: VlanArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let request = MoveRequest {
        vlan_id: args.vlan_id,
        source: args.source,
        target: args.target,
    };

    let moved = controller.move_vlan(&request).await?;
    let out = output::render_list(&global.output, &moved, |v| VlanRow::from(v), |v| {
        v.dn.to_string()
    })?;
    output::print_output(&out, global.quiet);

    let color = output::should_color(&global.color);

    if args.dry_run {
        if !global.quiet {
            eprintln!("{}", output::render_change_log(controller.change_log(), color));
            eprintln!("Dry run: nothing committed");
        }
        controller.discard();
        return Ok(());
    }

    if !controller.change_log().is_empty() {
        util::require_interactive("commit", global.yes)?;
    }

    let (yes, quiet) = (global.yes, global.quiet);
    let mut confirm = |pending: &ChangeLog| -> Result<bool, CoreError> {
        if shows_change_log(quiet, yes) {
            eprintln!("{}", output::render_change_log(pending, color));
        }
        if yes {
            return Ok(true);
        }
        util::confirm("Commit these changes?")
            .map_err(|e| CoreError::Internal(format!("confirmation prompt failed: {e}")))
    };

    match controller.commit(&mut confirm).await? {
        CommitOutcome::NothingToCommit => {
            if !quiet {
                eprintln!("Nothing to commit");
            }
        }
        CommitOutcome::Declined { pending } => {
            if !quiet {
                eprintln!("Commit declined; {pending} pending change(s) not applied");
            }
        }
        CommitOutcome::Committed { applied } => {
            if !quiet {
                eprintln!("Committed {applied} change(s)");
            }
        }
    }
    Ok(())
}

/// The change-log is printed before every prompt, even with `--quiet`.
fn shows_change_log(quiet: bool, yes: bool) -> bool {
    !quiet || !yes
}
