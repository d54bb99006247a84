//! Execution engine - applies a plan through a backend
//!
//! Actions run strictly in plan order. Execution is fail-fast: the first
//! failing action aborts the rest of the plan, and nothing already applied
//! is rolled back. A declined confirmation only skips that action.

use crate::backend::Backend;
use crate::context::{ActionOutcome, ConfirmCallback, ProgressCallback};
use crate::error::{Error, Result};
use crate::types::{Action, Plan};

/// Options for execution
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Don't make changes, just show what would happen
    pub dry_run: bool,
}

/// Summary of execution results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteSummary {
    /// Actions the package manager ran successfully
    pub applied: Vec<Action>,
    /// Actions the user declined
    pub cancelled: Vec<Action>,
    /// Actions skipped because of dry-run
    pub dry_run: Vec<Action>,
    /// Report-only actions
    pub reported: Vec<Action>,
}

impl ExecuteSummary {
    /// Record the outcome of one action
    pub fn add(&mut self, action: Action, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Applied => self.applied.push(action),
            ActionOutcome::Cancelled => self.cancelled.push(action),
            ActionOutcome::DryRun => self.dry_run.push(action),
            ActionOutcome::Reported => self.reported.push(action),
        }
    }

    /// Check that nothing was skipped by the user
    pub fn is_clean(&self) -> bool {
        self.cancelled.is_empty()
    }

    /// Total number of actions processed
    pub fn total(&self) -> usize {
        self.applied.len() + self.cancelled.len() + self.dry_run.len() + self.reported.len()
    }
}

/// Execute a plan with the given options and callbacks
///
/// # Arguments
/// * `plan` - The plan to run
/// * `backend` - Package manager to run actions through
/// * `confirm` - Confirmation callback for actions that need it
/// * `progress` - Progress callback
/// * `opts` - Execution options
///
/// # Returns
/// Summary of execution results, or the first fatal error
pub fn execute_plan(
    plan: &Plan,
    backend: &dyn Backend,
    confirm: &mut dyn ConfirmCallback,
    progress: &mut dyn ProgressCallback,
    opts: &ExecuteOptions,
) -> Result<ExecuteSummary> {
    let mut summary = ExecuteSummary::default();

    for action in plan {
        let outcome = run_action(action, backend, confirm, progress, opts.dry_run)?;
        summary.add(action.clone(), outcome);
    }

    Ok(summary)
}

/// Run a single action: confirm if needed, then execute.
pub(crate) fn run_action(
    action: &Action,
    backend: &dyn Backend,
    confirm: &mut dyn ConfirmCallback,
    progress: &mut dyn ProgressCallback,
    dry_run: bool,
) -> Result<ActionOutcome> {
    progress.on_action_start(action);

    let outcome = if action.is_report() {
        ActionOutcome::Reported
    } else if dry_run {
        ActionOutcome::DryRun
    } else {
        match confirm_and_execute(action, backend, confirm) {
            Ok(()) => ActionOutcome::Applied,
            Err(e) if !e.is_fatal() => {
                log::info!("{}", e);
                ActionOutcome::Cancelled
            }
            Err(e) => return Err(e),
        }
    };

    progress.on_action_complete(action, outcome);
    Ok(outcome)
}

fn confirm_and_execute(
    action: &Action,
    backend: &dyn Backend,
    confirm: &mut dyn ConfirmCallback,
) -> Result<()> {
    if action.requires_confirmation() {
        let cmd = backend
            .command_line(action)
            .map(|c| c.join(" "))
            .unwrap_or_else(|| action.to_string());
        let prompt = format!("About to execute: {}\nProceed?", cmd);

        if !confirm.confirm(&prompt)? {
            return Err(Error::OperationCancelled {
                action: action.label().to_string(),
            });
        }
    }

    backend.execute(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AutoConfirm, AutoDecline, NoProgress};
    use crate::testing::FakeBackend;
    use crate::types::{PackageSet, package_set};

    fn sample_plan() -> Plan {
        let mut plan = Plan::new();
        plan.push(Action::ReclassifyExplicit(package_set(["b"])));
        plan.push(Action::ReclassifyDependency(package_set(["z"])));
        plan.push(Action::InstallRegular(package_set(["a"])));
        plan.push(Action::InstallOptional(package_set(["x"])));
        plan
    }

    /// Records every prompt and answers from a script.
    struct ScriptedConfirm {
        answers: Vec<bool>,
        prompts: Vec<String>,
    }

    impl ConfirmCallback for ScriptedConfirm {
        fn confirm(&mut self, prompt: &str) -> Result<bool> {
            self.prompts.push(prompt.to_string());
            Ok(if self.answers.is_empty() {
                false
            } else {
                self.answers.remove(0)
            })
        }
    }

    #[test]
    fn test_runs_in_order() {
        let backend = FakeBackend::new();
        let plan = sample_plan();

        let summary = execute_plan(
            &plan,
            &backend,
            &mut AutoConfirm,
            &mut NoProgress,
            &ExecuteOptions::default(),
        )
        .unwrap();

        assert_eq!(backend.executed(), plan.actions().to_vec());
        assert_eq!(summary.applied.len(), 4);
        assert!(summary.is_clean());
    }

    #[test]
    fn test_fail_fast() {
        let backend = FakeBackend::new().failing_on("mark as explicit");

        let err = execute_plan(
            &sample_plan(),
            &backend,
            &mut AutoConfirm,
            &mut NoProgress,
            &ExecuteOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::ActionFailed { .. }));
        assert!(backend.executed().is_empty());
    }

    #[test]
    fn test_failure_keeps_earlier_actions() {
        let backend = FakeBackend::new().failing_on("install packages");

        let result = execute_plan(
            &sample_plan(),
            &backend,
            &mut AutoConfirm,
            &mut NoProgress,
            &ExecuteOptions::default(),
        );

        assert!(result.is_err());
        assert_eq!(backend.executed().len(), 2);
    }

    #[test]
    fn test_decline_continues() {
        let backend = FakeBackend::new();

        let summary = execute_plan(
            &sample_plan(),
            &backend,
            &mut AutoDecline,
            &mut NoProgress,
            &ExecuteOptions::default(),
        )
        .unwrap();

        assert_eq!(summary.cancelled.len(), 2);
        assert_eq!(summary.applied.len(), 2);
        assert!(!summary.is_clean());
        assert_eq!(
            backend.executed(),
            vec![
                Action::InstallRegular(package_set(["a"])),
                Action::InstallOptional(package_set(["x"])),
            ]
        );
    }

    #[test]
    fn test_prompt_shows_command_line() {
        let backend = FakeBackend::new();
        let mut confirm = ScriptedConfirm {
            answers: vec![true, false],
            prompts: Vec::new(),
        };

        let summary = execute_plan(
            &sample_plan(),
            &backend,
            &mut confirm,
            &mut NoProgress,
            &ExecuteOptions::default(),
        )
        .unwrap();

        assert_eq!(confirm.prompts.len(), 2);
        assert!(confirm.prompts[0].contains("fake -D --asexplicit b"));
        assert!(confirm.prompts[1].contains("fake -D --asdeps z"));
        assert_eq!(
            summary.cancelled,
            vec![Action::ReclassifyDependency(package_set(["z"]))]
        );
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let backend = FakeBackend::new();

        let summary = execute_plan(
            &sample_plan(),
            &backend,
            &mut AutoDecline,
            &mut NoProgress,
            &ExecuteOptions { dry_run: true },
        )
        .unwrap();

        assert!(backend.executed().is_empty());
        assert_eq!(summary.dry_run.len(), 4);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_report_is_not_executed() {
        let backend = FakeBackend::new();
        let mut plan = Plan::new();
        plan.push(Action::ReportUntracked(PackageSet::new()));

        let summary = execute_plan(
            &plan,
            &backend,
            &mut AutoConfirm,
            &mut NoProgress,
            &ExecuteOptions::default(),
        )
        .unwrap();

        assert_eq!(summary.reported.len(), 1);
        assert!(backend.executed().is_empty());
    }
}
