//! Provider traits for user interaction.
//!
//! These traits let the executor ask for confirmation and report progress
//! without depending on a specific terminal UI.

use crate::error::Result;
use crate::types::Action;

/// Confirmation callback for user interaction
///
/// Implement this trait to handle user confirmations.
pub trait ConfirmCallback {
    /// Ask the user to confirm an action
    ///
    /// # Arguments
    /// * `prompt` - The confirmation prompt to show
    ///
    /// # Returns
    /// `true` if the user confirmed, `false` otherwise
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Auto-confirm callback (always returns true)
pub struct AutoConfirm;

impl ConfirmCallback for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Auto-decline callback (always returns false)
pub struct AutoDecline;

impl ConfirmCallback for AutoDecline {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(false)
    }
}

/// How a single action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The package manager ran the action successfully
    Applied,
    /// The user declined the confirmation prompt
    Cancelled,
    /// Dry run: the action was only shown
    DryRun,
    /// Report-only action; nothing was executed
    Reported,
}

/// Progress callback for plan execution
///
/// Implement this trait to receive progress updates during execution.
pub trait ProgressCallback {
    /// Called before an action is confirmed and executed
    fn on_action_start(&mut self, action: &Action);

    /// Called when an action finished without a fatal error
    fn on_action_complete(&mut self, action: &Action, outcome: ActionOutcome);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_action_start(&mut self, _action: &Action) {}
    fn on_action_complete(&mut self, _action: &Action, _outcome: ActionOutcome) {}
}
