//! # pacmankit
//!
//! Declarative package lists for Arch Linux package managers.
//!
//! This crate provides functionality for:
//! - Parsing package list files into a desired state
//! - Reading the installed state from `pacman -Qe` / `pacman -Qd`
//! - Planning corrective actions (install, fix install reason, prune, report)
//! - Applying a plan through yay, paru or pacman, with confirmation
//! - Removing orphans until none are left
//!
//! ## Example
//!
//! ```no_run
//! use pacmankit::{AutoConfirm, Client, ExecuteOptions, Intents, NoProgress};
//! use std::path::Path;
//!
//! let client = Client::new(None).expect("no package manager available");
//!
//! let desired = client
//!     .desired_state(&[Path::new("packages.txt")])
//!     .expect("failed to read lists");
//! let actual = client.actual_state().expect("query failed");
//!
//! let intents = Intents { install: true, ..Default::default() };
//! let plan = client.plan(&desired, &actual, intents);
//! for action in &plan {
//!     println!("{action}");
//! }
//!
//! client
//!     .apply(&plan, &mut AutoConfirm, &mut NoProgress, &ExecuteOptions::default())
//!     .expect("apply failed");
//! ```
//!
//! ## Provider Traits
//!
//! The crate uses traits for dependency injection:
//!
//! - [`Backend`]: Queries and changes the package database
//! - [`ConfirmCallback`]: Handles user confirmations
//! - [`ProgressCallback`]: Receives progress updates
//!
//! The reconciler itself is a pure function and needs none of them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod context;
pub mod error;
pub mod executor;
pub mod installed;
pub mod listfile;
pub mod orphan;
pub mod reconcile;
pub mod types;

#[cfg(test)]
mod testing;

pub use backend::Backend;
pub use backend::pacman::{PackageManager, PacmanBackend};
pub use context::{
    ActionOutcome, AutoConfirm, AutoDecline, ConfirmCallback, NoProgress, ProgressCallback,
};
pub use error::{Error, ErrorCategory, Result};
pub use executor::{ExecuteOptions, ExecuteSummary, execute_plan};
pub use orphan::{OrphanPolicy, OrphanReport, OrphanStop};
pub use reconcile::reconcile;
pub use types::{
    Action, ActualState, DesiredState, InstallReason, Intents, PackageName, PackageSet, Plan,
};

use std::path::Path;

/// High-level client for package list reconciliation.
///
/// The client wraps a backend and provides convenient methods for the
/// read → plan → apply cycle.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Create a new Client for the first available package manager.
    ///
    /// `preferred` is tried before the default yay > paru > pacman order.
    pub fn new(preferred: Option<PackageManager>) -> Result<Self> {
        let backend = PacmanBackend::new(preferred)?;
        Ok(Self {
            backend: Box::new(backend),
        })
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Name of the package manager in use.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Parse and merge package lists.
    pub fn desired_state<P: AsRef<Path>>(&self, paths: &[P]) -> Result<DesiredState> {
        listfile::parse_files(paths)
    }

    /// Query the installed state.
    ///
    /// Both queries run in parallel; the state is only built once both have
    /// returned, and any failure discards the whole snapshot.
    pub fn actual_state(&self) -> Result<ActualState> {
        let backend = self.backend.as_ref();
        let (explicit, dependency) = rayon::join(
            || backend.query(InstallReason::Explicit),
            || backend.query(InstallReason::Dependency),
        );

        let state = installed::read(&explicit?, &dependency?);
        log::debug!(
            "Installed: {} explicit, {} dependencies",
            state.explicit.len(),
            state.dependency.len()
        );
        Ok(state)
    }

    // =========================================================================
    // Planning and execution
    // =========================================================================

    /// Compute the action plan.
    pub fn plan(&self, desired: &DesiredState, actual: &ActualState, intents: Intents) -> Plan {
        reconcile::reconcile(desired, actual, intents)
    }

    /// Full command line an action would run.
    pub fn command_line(&self, action: &Action) -> Option<Vec<String>> {
        self.backend.command_line(action)
    }

    /// Apply a plan.
    pub fn apply(
        &self,
        plan: &Plan,
        confirm: &mut dyn ConfirmCallback,
        progress: &mut dyn ProgressCallback,
        opts: &ExecuteOptions,
    ) -> Result<ExecuteSummary> {
        executor::execute_plan(plan, self.backend.as_ref(), confirm, progress, opts)
    }

    /// Orphans the package manager currently reports.
    pub fn orphans(&self) -> Result<PackageSet> {
        Ok(installed::parse_query_output(&self.backend.query_orphans()?))
    }

    /// Remove orphans until none are left.
    pub fn remove_orphans(
        &self,
        confirm: &mut dyn ConfirmCallback,
        progress: &mut dyn ProgressCallback,
        policy: OrphanPolicy,
    ) -> Result<OrphanReport> {
        orphan::remove_orphans(self.backend.as_ref(), confirm, progress, policy)
    }
}
