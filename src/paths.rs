//! Path resolution for pipac
//!
//! # Environment Variables
//!
//! - `PIPAC_CONFIG_DIR` - Override config directory (e.g., `~/dotfiles/pipac`)
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `PIPAC_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/pipac` (if set)
//! 3. `~/.config/pipac`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "PIPAC_CONFIG_DIR";

/// Base name of the shared default package list
const SHARED_LIST: &str = "packages";

/// Recognised package list extensions, in lookup order
const LIST_EXTENSIONS: [&str; 3] = ["txt", "org", "md"];

/// Get the pipac config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config.is_empty() {
            let path = PathBuf::from(xdg_config).join("pipac");
            log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
            return Ok(path);
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join("pipac");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Get the config directory, creating it if it does not exist yet
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create config dir: {}", dir.display()))?;
    Ok(dir)
}

/// Expand a path with shell-like expansion
///
/// Handles `~` and `$VAR` / `${VAR}`. Unknown variables leave the path as is.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

/// Host name of this machine (the uname node name)
#[cfg(unix)]
pub fn hostname() -> Option<String> {
    let mut buf = [0u8; 256];

    // SAFETY: gethostname writes at most buf.len() bytes into a buffer we own.
    // We check the return value before reading it.
    let result = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if result != 0 {
        return None;
    }

    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]).trim().to_string();
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(not(unix))]
pub fn hostname() -> Option<String> {
    None
}

/// Default package lists that exist in `dir`
///
/// Candidates are `packages.*` then `<hostname>.*`, each tried with the
/// extensions `txt`, `org` and `md` in that order.
pub fn default_lists(dir: &Path, hostname: Option<&str>) -> Vec<PathBuf> {
    let mut stems = vec![SHARED_LIST];
    stems.extend(hostname);

    stems
        .into_iter()
        .flat_map(|stem| {
            LIST_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{stem}.{ext}")))
        })
        .filter(|path| path.is_file())
        .collect()
}

/// Work out which package lists to use
///
/// Lists given on the command line replace discovery entirely. Otherwise the
/// default lists (when enabled) are followed by the extra lists from config.
pub fn resolve_lists(
    explicit: &[PathBuf],
    dir: &Path,
    hostname: Option<&str>,
    use_defaults: bool,
    extra: &[String],
) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }

    let mut lists = if use_defaults {
        default_lists(dir, hostname)
    } else {
        Vec::new()
    };
    lists.extend(extra.iter().map(|p| expand(p)));
    lists.dedup();
    lists
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to run a test with temporary env var
    ///
    /// # Safety
    /// This function uses unsafe env::set_var/remove_var which can cause issues
    /// if other threads read environment variables concurrently.
    /// Only use in single-threaded test contexts.
    fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Tests run in isolation and don't read env vars concurrently
        unsafe { env::set_var(key, value) };
        let result = f();
        match original {
            // SAFETY: Tests run in isolation
            Some(v) => unsafe { env::set_var(key, v) },
            None => unsafe { env::remove_var(key) },
        }
        result
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_config_dir_env_override() {
        with_env_var(ENV_CONFIG_DIR, "/custom/pipac/config", || {
            assert_eq!(config_dir().unwrap(), PathBuf::from("/custom/pipac/config"));
        });
    }

    #[test]
    fn test_expand_with_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand("~/lists/a.txt"), home.join("lists").join("a.txt"));
    }

    #[test]
    fn test_expand_with_env_var() {
        with_env_var("PIPAC_TEST_VAR", "test_value", || {
            assert_eq!(expand("/x/$PIPAC_TEST_VAR/y"), PathBuf::from("/x/test_value/y"));
        });
    }

    #[test]
    fn test_expand_unknown_env_var_unchanged() {
        let path = "/x/$PIPAC_SURELY_UNSET_VAR/y";
        assert_eq!(expand(path), PathBuf::from(path));
    }

    #[test]
    fn test_default_lists_order() {
        let dir = TempDir::new().unwrap();
        let host_md = touch(dir.path(), "box.md");
        let pkg_org = touch(dir.path(), "packages.org");
        let pkg_txt = touch(dir.path(), "packages.txt");
        touch(dir.path(), "other.txt");

        let lists = default_lists(dir.path(), Some("box"));
        assert_eq!(lists, vec![pkg_txt, pkg_org, host_md]);
    }

    #[test]
    fn test_default_lists_without_hostname() {
        let dir = TempDir::new().unwrap();
        let pkg = touch(dir.path(), "packages.md");
        touch(dir.path(), "box.txt");

        assert_eq!(default_lists(dir.path(), None), vec![pkg]);
    }

    #[test]
    fn test_default_lists_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(default_lists(dir.path(), Some("box")).is_empty());
    }

    #[test]
    fn test_explicit_lists_replace_discovery() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "packages.txt");
        let explicit = vec![PathBuf::from("/tmp/only.txt")];

        let extra = vec!["/extra.txt".to_string()];
        let lists = resolve_lists(&explicit, dir.path(), None, true, &extra);
        assert_eq!(lists, explicit);
    }

    #[test]
    fn test_resolve_defaults_then_extra() {
        let dir = TempDir::new().unwrap();
        let pkg = touch(dir.path(), "packages.txt");
        let extra = vec!["/extra.txt".to_string()];

        let lists = resolve_lists(&[], dir.path(), None, true, &extra);
        assert_eq!(lists, vec![pkg, PathBuf::from("/extra.txt")]);

        let lists = resolve_lists(&[], dir.path(), None, false, &extra);
        assert_eq!(lists, vec![PathBuf::from("/extra.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_hostname_has_no_padding() {
        if let Some(name) = hostname() {
            assert!(!name.is_empty());
            assert!(!name.contains('\0'));
        }
    }
}
