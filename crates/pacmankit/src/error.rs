//! Error types for package list reconciliation.
//!
//! Errors are categorized so the caller can tell a fatal failure (stop the
//! run, exit non-zero) from a normal negative answer at a confirmation
//! prompt, which only skips one step.

use std::path::PathBuf;
use thiserror::Error;

/// Categories of errors, used to decide how a run proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A declared package list does not exist
    ListNotFound,
    /// None of yay, paru or pacman is installed
    NoPackageManager,
    /// An installed-state query exited non-zero
    Query,
    /// A package manager action exited non-zero
    Action,
    /// The user declined a confirmation prompt
    Cancelled,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Whether this error must terminate the run.
    ///
    /// Cancellation is the only non-fatal category: the declined step is
    /// skipped and the remaining requested steps still run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ListNotFound => "Package list not found",
            Self::NoPackageManager => "No supported package manager",
            Self::Query => "Package query failed",
            Self::Action => "Package manager command failed",
            Self::Cancelled => "Operation cancelled",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::ListNotFound => "Check the list path or create the file in the config directory",
            Self::NoPackageManager => "Install pacman, yay or paru and make sure it is on PATH",
            Self::Query => "Run the query by hand to inspect the package database",
            Self::Action => "Review the package manager output above and re-run",
            Self::Cancelled => "No action needed",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur while reading lists, querying state or applying a plan.
#[derive(Debug, Error)]
pub enum Error {
    /// A package list path does not exist
    #[error("package list not found: {}", .0.display())]
    ListNotFound(PathBuf),

    /// No supported package manager binary is available
    #[error("no supported package manager found (tried yay, paru, pacman)")]
    NoPackageManagerFound,

    /// Installed-state query exited non-zero
    #[error("query `{query}` failed: {stderr}")]
    QueryFailed {
        /// Command line of the query
        query: String,
        /// Standard error output of the query
        stderr: String,
    },

    /// An action exited non-zero
    #[error("{action} failed: {message}")]
    ActionFailed {
        /// Human-readable action label
        action: String,
        /// Failure details (exit status or spawn error)
        message: String,
    },

    /// The user declined a confirmation prompt
    #[error("{action} cancelled")]
    OperationCancelled {
        /// Human-readable action label
        action: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ListNotFound(_) => ErrorCategory::ListNotFound,
            Error::NoPackageManagerFound => ErrorCategory::NoPackageManager,
            Error::QueryFailed { .. } => ErrorCategory::Query,
            Error::ActionFailed { .. } => ErrorCategory::Action,
            Error::OperationCancelled { .. } => ErrorCategory::Cancelled,
            _ => ErrorCategory::Other,
        }
    }

    /// Whether this error must terminate the run.
    pub fn is_fatal(&self) -> bool {
        self.category().is_fatal()
    }
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, Error>;
