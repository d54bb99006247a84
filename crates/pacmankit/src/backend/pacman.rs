//! Real package manager backend using `yay`, `paru` or `sudo pacman`.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{Action, InstallReason};
use serde::{Deserialize, Serialize};
use std::process::{Command, Output, Stdio};

/// Supported package managers, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// yay AUR helper
    Yay,
    /// paru AUR helper
    Paru,
    /// plain pacman, run through sudo for changes
    Pacman,
}

impl PackageManager {
    /// All managers in detection order.
    pub const ALL: [PackageManager; 3] = [Self::Yay, Self::Paru, Self::Pacman];

    /// Executable name.
    pub fn binary(&self) -> &'static str {
        match self {
            Self::Yay => "yay",
            Self::Paru => "paru",
            Self::Pacman => "pacman",
        }
    }

    /// Whether changes must be run with privilege escalation.
    ///
    /// The AUR helpers call sudo themselves.
    pub fn needs_sudo(&self) -> bool {
        matches!(self, Self::Pacman)
    }

    /// Program prefix used for actions that change the database.
    pub fn program(&self) -> Vec<String> {
        if self.needs_sudo() {
            vec!["sudo".to_string(), self.binary().to_string()]
        } else {
            vec![self.binary().to_string()]
        }
    }

    /// Parse a manager from its executable name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yay" => Some(Self::Yay),
            "paru" => Some(Self::Paru),
            "pacman" => Some(Self::Pacman),
            _ => None,
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Detect the package manager to use.
///
/// A preferred manager is tried first; otherwise the order is
/// yay > paru > pacman.
pub fn detect(preferred: Option<PackageManager>) -> Result<PackageManager> {
    detect_with(preferred, command_exists)
}

/// Detection with an injectable availability check.
pub fn detect_with<F>(preferred: Option<PackageManager>, is_available: F) -> Result<PackageManager>
where
    F: Fn(&str) -> bool,
{
    if let Some(pm) = preferred {
        if is_available(pm.binary()) {
            log::debug!("Using preferred package manager: {}", pm);
            return Ok(pm);
        }
        log::warn!(
            "Preferred package manager {} not found, falling back to detection",
            pm
        );
    }

    PackageManager::ALL
        .into_iter()
        .find(|pm| is_available(pm.binary()))
        .inspect(|pm| log::debug!("Detected package manager: {}", pm))
        .ok_or(Error::NoPackageManagerFound)
}

/// Check if a command exists on PATH.
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Operation flags for an action, or `None` for report-only actions.
pub fn action_flags(action: &Action) -> Option<Vec<&'static str>> {
    const SYNC: [&str; 4] = ["-S", "--needed", "--sysupgrade", "--refresh"];

    let flags = match action {
        Action::ReclassifyExplicit(_) => vec!["-D", "--asexplicit"],
        Action::InstallRegular(_) => SYNC.to_vec(),
        Action::InstallOptional(_) => {
            let mut flags = SYNC.to_vec();
            flags.push("--asdeps");
            flags
        }
        Action::ReclassifyDependency(_) => vec!["-D", "--asdeps"],
        Action::RemoveOrphans(_) => vec!["-Rns"],
        Action::ReportUntracked(_) => return None,
    };
    Some(flags)
}

/// Query flags for an install reason.
fn query_flag(reason: InstallReason) -> &'static str {
    match reason {
        InstallReason::Explicit => "-Qe",
        InstallReason::Dependency => "-Qd",
    }
}

/// Backend that executes real package manager commands.
pub struct PacmanBackend {
    manager: PackageManager,
}

impl PacmanBackend {
    /// Create a backend for the first available package manager.
    ///
    /// Returns [`Error::NoPackageManagerFound`] if none is installed.
    pub fn new(preferred: Option<PackageManager>) -> Result<Self> {
        let manager = detect(preferred)?;
        Ok(Self { manager })
    }

    /// Create a backend for a specific manager without checking it exists.
    pub fn with_manager(manager: PackageManager) -> Self {
        Self { manager }
    }

    /// The manager this backend drives.
    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    /// Run a read-only query and capture its output.
    ///
    /// Queries never need root, so they run without sudo.
    fn run_query(&self, args: &[&str]) -> Result<(String, Output)> {
        let display = format!("{} {}", self.manager.binary(), args.join(" "));
        log::debug!("Running query: {}", display);

        let output = Command::new(self.manager.binary())
            .args(args)
            .output()
            .map_err(|e| Error::QueryFailed {
                query: display.clone(),
                stderr: format!("failed to execute: {}", e),
            })?;
        Ok((display, output))
    }
}

impl Backend for PacmanBackend {
    fn name(&self) -> &str {
        self.manager.binary()
    }

    fn query(&self, reason: InstallReason) -> Result<String> {
        let (display, output) = self.run_query(&[query_flag(reason)])?;

        if !output.status.success() {
            return Err(Error::QueryFailed {
                query: display,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn query_orphans(&self) -> Result<String> {
        let (display, output) = self.run_query(&["-Qdtq"])?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();

        // pacman exits 1 when the query matches nothing
        if output.status.success() || (output.status.code() == Some(1) && stdout.trim().is_empty())
        {
            return Ok(stdout);
        }

        Err(Error::QueryFailed {
            query: display,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn command_line(&self, action: &Action) -> Option<Vec<String>> {
        let flags = action_flags(action)?;
        let mut cmd = self.manager.program();
        cmd.extend(flags.into_iter().map(str::to_string));
        cmd.extend(action.packages().iter().map(|p| p.as_str().to_string()));
        Some(cmd)
    }

    fn execute(&self, action: &Action) -> Result<()> {
        let Some(cmd) = self.command_line(action) else {
            return Ok(());
        };
        if action.packages().is_empty() {
            log::debug!("Skipping {} with no packages", action.label());
            return Ok(());
        }

        log::debug!("Executing: {}", cmd.join(" "));

        // Inherit stdio: the package manager may ask its own questions
        let status = Command::new(&cmd[0])
            .args(&cmd[1..])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::ActionFailed {
                action: action.label().to_string(),
                message: format!("failed to execute {}: {}", cmd[0], e),
            })?;

        if !status.success() {
            return Err(Error::ActionFailed {
                action: action.label().to_string(),
                message: format!("`{}` exited with {}", cmd.join(" "), status),
            });
        }

        Ok(())
    }
}
