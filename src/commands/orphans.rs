//! Orphan removal.

use anyhow::Result;
use pacmankit::types::join_names;
use pacmankit::{Client, OrphanPolicy, OrphanReport, OrphanStop};

use super::{TerminalProgress, confirm_callback};
use crate::Context;
use crate::ui;

/// Remove orphaned dependencies until none are left.
pub fn run(ctx: &Context, client: &Client, policy: OrphanPolicy) -> Result<()> {
    if ctx.dry_run {
        let orphans = client.orphans()?;
        if orphans.is_empty() {
            ui::info("No orphans to remove");
        } else {
            ui::info(&format!(
                "Would remove {} (further passes may find more): {}",
                ui::count(orphans.len(), "orphan"),
                join_names(&orphans, " ")
            ));
        }
        return Ok(());
    }

    let mut confirm = confirm_callback(ctx);
    let mut progress = TerminalProgress::new(ctx, client);
    let report = client.remove_orphans(confirm.as_mut(), &mut progress, policy)?;

    print_report(ctx, &report, policy);
    Ok(())
}

fn print_report(ctx: &Context, report: &OrphanReport, policy: OrphanPolicy) {
    match report.stop {
        OrphanStop::Exhausted if report.passes == 0 => {
            if !ctx.quiet {
                ui::info("No orphans to remove");
            }
        }
        OrphanStop::Exhausted => {
            if !ctx.quiet {
                ui::success(&format!(
                    "Removed {} in {}",
                    ui::count(report.removed.len(), "orphan"),
                    ui::count(report.passes, "pass")
                ));
            }
        }
        OrphanStop::Declined => {
            if report.passes > 0 && !ctx.quiet {
                ui::info(&format!(
                    "Removed {} before stopping",
                    ui::count(report.removed.len(), "orphan")
                ));
            }
        }
        OrphanStop::PassLimitReached => ui::warn(&format!(
            "Orphans remain after {}; raise max_orphan_passes or check the package database",
            ui::count(policy.max_passes, "pass")
        )),
    }
}
