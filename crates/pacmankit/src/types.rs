//! Core types for package list reconciliation.

use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// A package name as understood by pacman.
///
/// Names are opaque, case-sensitive tokens: never empty and never containing
/// whitespace. Identity is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Create a package name, rejecting empty or whitespace-containing input.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            None
        } else {
            Some(Self(name))
        }
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A set of package names.
///
/// Ordered so that command lines and printed reports are deterministic.
pub type PackageSet = BTreeSet<PackageName>;

/// Build a [`PackageSet`] from string slices, dropping invalid names.
pub fn package_set<'a>(names: impl IntoIterator<Item = &'a str>) -> PackageSet {
    names.into_iter().filter_map(PackageName::new).collect()
}

/// Join package names with a separator for display.
pub fn join_names(names: &PackageSet, sep: &str) -> String {
    names
        .iter()
        .map(PackageName::as_str)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Install reason recorded by the package database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallReason {
    /// Directly requested by the user
    Explicit,
    /// Pulled in to satisfy another package
    Dependency,
}

impl fmt::Display for InstallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallReason::Explicit => write!(f, "explicit"),
            InstallReason::Dependency => write!(f, "dependency"),
        }
    }
}

/// Desired package state, merged from every package list.
///
/// A name prefixed with `&` in any list is optional; an unprefixed name is
/// regular. A name can legitimately end up in both sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesiredState {
    /// Packages that must be installed explicitly
    pub regular: PackageSet,
    /// Packages that must be installed as dependencies
    pub optional: PackageSet,
}

impl DesiredState {
    /// Create an empty desired state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another desired state into this one (set union per category).
    pub fn merge(&mut self, other: DesiredState) {
        self.regular.extend(other.regular);
        self.optional.extend(other.optional);
    }

    /// Check if no package is declared at all.
    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.optional.is_empty()
    }
}

/// Installed package state as reported by the package manager.
///
/// The two sets are disjoint; the package database guarantees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActualState {
    /// Packages installed explicitly
    pub explicit: PackageSet,
    /// Packages installed as dependencies
    pub dependency: PackageSet,
}

/// Which categories of corrective action were requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    /// Install packages missing from the system
    pub install: bool,
    /// Mark undeclared explicit packages as dependencies
    pub prune: bool,
    /// Report undeclared explicit packages and do nothing else
    pub report: bool,
}

impl Intents {
    /// Check if any category was requested.
    pub fn any(&self) -> bool {
        self.install || self.prune || self.report
    }
}

/// A corrective action against the package database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "packages", rename_all = "snake_case")]
pub enum Action {
    /// Mark packages as explicitly installed
    ReclassifyExplicit(PackageSet),
    /// Install packages explicitly
    InstallRegular(PackageSet),
    /// Install packages as dependencies
    InstallOptional(PackageSet),
    /// Mark explicit packages as dependencies (prune)
    ReclassifyDependency(PackageSet),
    /// Report explicit packages absent from every list
    ReportUntracked(PackageSet),
    /// Remove a batch of orphaned dependencies
    RemoveOrphans(PackageSet),
}

impl Action {
    /// Package names this action applies to.
    pub fn packages(&self) -> &PackageSet {
        match self {
            Action::ReclassifyExplicit(names)
            | Action::InstallRegular(names)
            | Action::InstallOptional(names)
            | Action::ReclassifyDependency(names)
            | Action::ReportUntracked(names)
            | Action::RemoveOrphans(names) => names,
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::ReclassifyExplicit(_) => "mark as explicit",
            Action::InstallRegular(_) => "install packages",
            Action::InstallOptional(_) => "install optional dependencies",
            Action::ReclassifyDependency(_) => "mark as dependencies",
            Action::ReportUntracked(_) => "report untracked packages",
            Action::RemoveOrphans(_) => "remove orphans",
        }
    }

    /// Whether the user must confirm this action before it runs.
    pub fn requires_confirmation(&self) -> bool {
        matches!(
            self,
            Action::ReclassifyExplicit(_)
                | Action::ReclassifyDependency(_)
                | Action::RemoveOrphans(_)
        )
    }

    /// Whether this action only reports and never reaches the package manager.
    pub fn is_report(&self) -> bool {
        matches!(self, Action::ReportUntracked(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), join_names(self.packages(), ", "))
    }
}

/// An ordered sequence of actions produced by the reconciler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Plan {
    actions: Vec<Action>,
}

impl Plan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Actions in execution order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Iterate over actions in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if there is nothing to do.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Check if this plan is a drift report.
    pub fn is_report(&self) -> bool {
        self.actions.iter().any(Action::is_report)
    }
}

impl IntoIterator for Plan {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
