//! Command implementations and the terminal side of the pacmankit providers.

pub mod orphans;
pub mod reconcile;

use colored::Colorize;
use dialoguer::Confirm;
use pacmankit::types::join_names;
use pacmankit::{Action, ActionOutcome, Client, ConfirmCallback, Error, ProgressCallback};

use crate::Context;
use crate::ui;

/// Confirmation through an interactive `[y/N]` prompt.
pub struct TerminalConfirm;

impl ConfirmCallback for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> pacmankit::Result<bool> {
        // Multi-line prompts: print the context, ask with the last line
        let (context, question) = prompt.rsplit_once('\n').unwrap_or(("", prompt));
        if !context.is_empty() {
            println!("{}", context);
        }

        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| Error::Other(format!("confirmation prompt failed: {e}")))
    }
}

/// Build the confirm callback for this run.
pub fn confirm_callback(ctx: &Context) -> Box<dyn ConfirmCallback> {
    if ctx.noconfirm {
        Box::new(pacmankit::AutoConfirm)
    } else {
        Box::new(TerminalConfirm)
    }
}

/// Prints each action as it starts and how it ended.
pub struct TerminalProgress<'a> {
    client: &'a Client,
    quiet: bool,
}

impl<'a> TerminalProgress<'a> {
    pub fn new(ctx: &Context, client: &'a Client) -> Self {
        Self {
            client,
            quiet: ctx.quiet,
        }
    }
}

impl ProgressCallback for TerminalProgress<'_> {
    fn on_action_start(&mut self, action: &Action) {
        if self.quiet || action.is_report() {
            return;
        }
        ui::section(&format!(
            "{} ({})",
            heading(action),
            action.packages().len()
        ));
        ui::dim(&join_names(action.packages(), " "));
    }

    fn on_action_complete(&mut self, action: &Action, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Applied => {
                if !self.quiet {
                    ui::success(done_message(action));
                }
            }
            ActionOutcome::Cancelled => ui::warn("Operation cancelled."),
            ActionOutcome::DryRun => {
                let cmd = self
                    .client
                    .command_line(action)
                    .map(|c| c.join(" "))
                    .unwrap_or_default();
                println!("  {} {}", "would run:".yellow(), cmd);
            }
            ActionOutcome::Reported => {}
        }
    }
}

fn heading(action: &Action) -> &'static str {
    match action {
        Action::ReclassifyExplicit(_) => "Fixing install reason to explicit",
        Action::InstallRegular(_) => "Installing packages",
        Action::InstallOptional(_) => "Installing optional dependencies",
        Action::ReclassifyDependency(_) => "Marking as dependencies",
        Action::RemoveOrphans(_) => "Removing orphans",
        Action::ReportUntracked(_) => "Untracked packages",
    }
}

fn done_message(action: &Action) -> &'static str {
    match action {
        Action::ReclassifyExplicit(_) => "Packages marked as explicit",
        Action::InstallRegular(_) => "Packages installed",
        Action::InstallOptional(_) => "Optional dependencies installed",
        Action::ReclassifyDependency(_) => "Packages marked as dependencies",
        Action::RemoveOrphans(_) => "Orphans removed",
        Action::ReportUntracked(_) => "Report done",
    }
}
