//! Install / prune / report against the package lists.

use anyhow::{Context as _, Result};
use pacmankit::types::join_names;
use pacmankit::{
    Action, Client, ExecuteOptions, ExecuteSummary, Intents, PackageSet, Plan,
};
use std::path::PathBuf;
use std::process::ExitCode;

use super::{TerminalProgress, confirm_callback};
use crate::Context;
use crate::progress;
use crate::ui;

/// Reconcile the installed packages with `lists`.
///
/// A report always ends with exit code 1.
pub fn run(
    ctx: &Context,
    client: &Client,
    lists: &[PathBuf],
    intents: Intents,
) -> Result<ExitCode> {
    if lists.is_empty() {
        log::warn!("No package lists found; every explicit package counts as untracked");
    }
    for list in lists {
        log::info!("Using package list: {}", list.display());
    }

    let desired = client.desired_state(lists)?;

    let pb = if ctx.quiet || intents.report {
        progress::hidden()
    } else {
        progress::spinner(&format!(
            "Querying installed packages ({})...",
            client.backend_name()
        ))
    };
    let actual = match client.actual_state() {
        Ok(actual) => {
            progress::finish_success(
                &pb,
                &format!(
                    "{} installed, {} explicitly",
                    ui::count(actual.explicit.len() + actual.dependency.len(), "package"),
                    actual.explicit.len()
                ),
            );
            actual
        }
        Err(e) => {
            progress::finish_error(&pb, "Could not read installed packages");
            return Err(e.into());
        }
    };
    log::debug!(
        "Desired: {} regular, {} optional",
        desired.regular.len(),
        desired.optional.len()
    );

    let plan = client.plan(&desired, &actual, intents);

    if plan.is_report() {
        let output = render_report(untracked(&plan)?, ctx.json)?;
        if !output.is_empty() {
            println!("{output}");
        }
        return Ok(ExitCode::FAILURE);
    }

    if let Some(json) = plan_json(ctx, &plan)? {
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    if plan.is_empty() {
        if !ctx.quiet {
            ui::success("System matches the package lists");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut confirm = confirm_callback(ctx);
    let mut progress = TerminalProgress::new(ctx, client);
    let opts = ExecuteOptions {
        dry_run: ctx.dry_run,
    };
    let summary = client.apply(&plan, confirm.as_mut(), &mut progress, &opts)?;

    print_summary(ctx, &summary);
    Ok(ExitCode::SUCCESS)
}

/// The plan as JSON when `--dry-run --json` asked for it, even if empty.
fn plan_json(ctx: &Context, plan: &Plan) -> Result<Option<String>> {
    if ctx.dry_run && ctx.json {
        Ok(Some(serde_json::to_string_pretty(plan)?))
    } else {
        Ok(None)
    }
}

/// Packages named by the report action of a plan.
fn untracked(plan: &Plan) -> Result<&PackageSet> {
    plan.iter()
        .find_map(|action| match action {
            Action::ReportUntracked(names) => Some(names),
            _ => None,
        })
        .context("report plan without a report action")
}

/// Untracked packages, one per line (or a JSON array).
fn render_report(untracked: &PackageSet, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(untracked)?)
    } else {
        Ok(join_names(untracked, "\n"))
    }
}

fn print_summary(ctx: &Context, summary: &ExecuteSummary) {
    if ctx.quiet {
        return;
    }

    if ctx.dry_run {
        println!();
        ui::info(&format!(
            "Dry run: {} would be executed",
            ui::count(summary.dry_run.len(), "action")
        ));
        return;
    }

    let pruned = summary
        .applied
        .iter()
        .any(|a| matches!(a, Action::ReclassifyDependency(_)));
    if pruned {
        ui::dim("Pruned packages are now dependencies; run `pipac --orphans` to remove them");
    }

    if !summary.is_clean() {
        ui::warn(&format!(
            "{} skipped",
            ui::count(summary.cancelled.len(), "step")
        ));
    }
}
