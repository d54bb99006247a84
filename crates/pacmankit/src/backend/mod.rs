//! Backend abstraction for package manager operations.
//!
//! The [`Backend`] trait defines the interface for talking to the package
//! database, allowing for different implementations (real CLI, fakes for
//! testing).

pub mod pacman;

use crate::error::Result;
use crate::types::{Action, InstallReason};

/// Backend trait for package manager operations.
///
/// This trait abstracts the underlying package manager, enabling:
/// - Real CLI execution via `yay`, `paru` or `sudo pacman`
/// - Fake implementations for testing
///
/// Queries return raw text in the `<name> <version>` line format; parsing
/// lives in [`crate::installed`].
pub trait Backend: Send + Sync {
    /// Short name of the backend (e.g. `paru`).
    fn name(&self) -> &str;

    /// Raw output of the installed-package query for one install reason.
    fn query(&self, reason: InstallReason) -> Result<String>;

    /// Raw output of the orphan query (one name per line, empty if none).
    fn query_orphans(&self) -> Result<String>;

    /// Full command line an action would run, or `None` for report-only actions.
    fn command_line(&self, action: &Action) -> Option<Vec<String>>;

    /// Run an action against the package database.
    fn execute(&self, action: &Action) -> Result<()>;
}
