//! Installed-state reader.
//!
//! Turns the text printed by `pacman -Qe` / `pacman -Qd` (and the AUR
//! helpers, which share the format) into package sets. Each line looks like
//! `<name> <version...>`; only the leading name matters.

use crate::types::{ActualState, PackageName, PackageSet};

/// Parse query output into a set of package names.
///
/// Blank lines are skipped.
pub fn parse_query_output(raw: &str) -> PackageSet {
    raw.lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(PackageName::new)
        .collect()
}

/// Build the actual state from the explicit and dependency query outputs.
pub fn read(raw_explicit: &str, raw_dependency: &str) -> ActualState {
    ActualState {
        explicit: parse_query_output(raw_explicit),
        dependency: parse_query_output(raw_dependency),
    }
}
