//! Drift detection and action planning.
//!
//! Compares the desired state from the package lists with the installed
//! state and produces the ordered list of corrective actions:
//! - Declared packages held as dependencies (bad install reason)
//! - Explicit packages absent from the lists (untracked / to prune)
//! - Declared packages that are not installed (missing)
//!
//! Planning is a pure computation. It never fails and never touches the
//! package database; the executor applies the result.

use crate::types::{Action, ActualState, DesiredState, Intents, PackageSet, Plan};

/// Declared regular packages currently installed as dependencies.
///
/// These must be marked explicit before any install or prune step, or they
/// would be counted as missing.
pub fn bad_install_reason(desired: &DesiredState, actual: &ActualState) -> PackageSet {
    desired
        .regular
        .intersection(&actual.dependency)
        .cloned()
        .collect()
}

/// Explicit packages that no list declares as regular.
pub fn untracked(desired: &DesiredState, actual: &ActualState) -> PackageSet {
    actual
        .explicit
        .difference(&desired.regular)
        .cloned()
        .collect()
}

/// Compute the action plan for the requested intents.
///
/// Steps run in a fixed order because later steps read the corrected
/// baseline:
/// 1. report (terminal: nothing else is planned)
/// 2. mark bad-install-reason packages explicit
/// 3. prune
/// 4. install regular, then optional
pub fn reconcile(desired: &DesiredState, actual: &ActualState, intents: Intents) -> Plan {
    let mut plan = Plan::new();

    if intents.report {
        plan.push(Action::ReportUntracked(untracked(desired, actual)));
        return plan;
    }

    if !intents.install && !intents.prune {
        return plan;
    }

    let bad_reason = bad_install_reason(desired, actual);
    if !bad_reason.is_empty() {
        log::debug!("{} packages have a bad install reason", bad_reason.len());
        plan.push(Action::ReclassifyExplicit(bad_reason.clone()));
    }

    if intents.prune {
        let to_prune = untracked(desired, actual);
        if !to_prune.is_empty() {
            plan.push(Action::ReclassifyDependency(to_prune));
        }
    }

    if intents.install {
        let missing_regular: PackageSet = desired
            .regular
            .iter()
            .filter(|name| !actual.explicit.contains(*name) && !bad_reason.contains(*name))
            .cloned()
            .collect();
        let missing_optional: PackageSet = desired
            .optional
            .difference(&actual.dependency)
            .cloned()
            .collect();

        if !missing_regular.is_empty() {
            plan.push(Action::InstallRegular(missing_regular));
        }
        if !missing_optional.is_empty() {
            plan.push(Action::InstallOptional(missing_optional));
        }
    }

    plan
}
