//! Orphan removal policy.
//!
//! Removing an orphan can orphan its own dependencies, so removal repeats
//! until the orphan query comes back empty, the user declines, or the pass
//! limit is hit. Detecting orphans is the package manager's job; this module
//! only decides what to do with the names it reports.

use crate::backend::Backend;
use crate::context::{ActionOutcome, ConfirmCallback, ProgressCallback};
use crate::error::Result;
use crate::executor::run_action;
use crate::installed::parse_query_output;
use crate::types::{Action, PackageSet};

/// Default number of removal passes before giving up.
pub const DEFAULT_MAX_PASSES: usize = 32;

/// Iteration policy for orphan removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrphanPolicy {
    /// Maximum number of removal batches
    pub max_passes: usize,
}

impl Default for OrphanPolicy {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl OrphanPolicy {
    /// Create a policy with a custom pass limit.
    pub fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }

    /// The removal to propose for a freshly queried orphan set.
    pub fn next_action(&self, orphans: PackageSet) -> Option<Action> {
        if orphans.is_empty() {
            None
        } else {
            Some(Action::RemoveOrphans(orphans))
        }
    }
}

/// Why the orphan loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanStop {
    /// The orphan query returned nothing
    Exhausted,
    /// The user declined a removal
    Declined,
    /// The pass limit was reached with orphans still reported
    PassLimitReached,
}

/// Result of an orphan removal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanReport {
    /// Number of batches removed
    pub passes: usize,
    /// Every package removed across all passes
    pub removed: PackageSet,
    /// Why the loop stopped
    pub stop: OrphanStop,
}

/// Remove orphans until none are left.
///
/// A failed removal is fatal and returned as an error; a declined
/// confirmation ends the loop normally.
pub fn remove_orphans(
    backend: &dyn Backend,
    confirm: &mut dyn ConfirmCallback,
    progress: &mut dyn ProgressCallback,
    policy: OrphanPolicy,
) -> Result<OrphanReport> {
    let mut report = OrphanReport {
        passes: 0,
        removed: PackageSet::new(),
        stop: OrphanStop::Exhausted,
    };

    loop {
        let orphans = parse_query_output(&backend.query_orphans()?);
        let Some(action) = policy.next_action(orphans) else {
            report.stop = OrphanStop::Exhausted;
            return Ok(report);
        };

        if report.passes >= policy.max_passes {
            log::warn!(
                "Stopping orphan removal after {} passes; {} orphans remain",
                report.passes,
                action.packages().len()
            );
            report.stop = OrphanStop::PassLimitReached;
            return Ok(report);
        }

        match run_action(&action, backend, confirm, progress, false)? {
            ActionOutcome::Applied => {
                report.passes += 1;
                report.removed.extend(action.packages().iter().cloned());
            }
            _ => {
                report.stop = OrphanStop::Declined;
                return Ok(report);
            }
        }
    }
}
