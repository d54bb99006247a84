//! pipac configuration file
//!
//! Loaded once from `config.toml` in the config directory; a missing file
//! yields the defaults.

use anyhow::{Context, Result};
use pacmankit::PackageManager;
use pacmankit::orphan::DEFAULT_MAX_PASSES;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipacConfig {
    /// Discover `packages.*` and `<hostname>.*` in the config directory
    pub default_lists: bool,

    /// Extra list files; `~` and `$VARS` are expanded
    pub lists: Vec<String>,

    /// Preferred package manager, tried before the yay > paru > pacman order
    pub package_manager: Option<PackageManager>,

    /// Upper bound on orphan removal passes
    pub max_orphan_passes: usize,
}

impl Default for PipacConfig {
    fn default() -> Self {
        Self {
            default_lists: true,
            lists: Vec::new(),
            package_manager: None,
            max_orphan_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl PipacConfig {
    /// Load the config from `path`, or the defaults if it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))
    }

    /// Parse config from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.max_orphan_passes == 0 {
            anyhow::bail!("max_orphan_passes must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PipacConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, PipacConfig::default());
        assert!(config.default_lists);
        assert_eq!(config.max_orphan_passes, 32);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(PipacConfig::parse("").unwrap(), PipacConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = PipacConfig::parse(
            r#"
default_lists = false
lists = ["~/dotfiles/extra.txt", "/etc/pipac/base.txt"]
package_manager = "paru"
max_orphan_passes = 5
"#,
        )
        .unwrap();

        assert!(!config.default_lists);
        assert_eq!(config.lists.len(), 2);
        assert_eq!(config.package_manager, Some(PackageManager::Paru));
        assert_eq!(config.max_orphan_passes, 5);
    }

    #[test]
    fn test_unknown_package_manager_rejected() {
        assert!(PipacConfig::parse(r#"package_manager = "apt""#).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(PipacConfig::parse("colour = true").is_err());
    }

    #[test]
    fn test_zero_passes_rejected() {
        assert!(PipacConfig::parse("max_orphan_passes = 0").is_err());
    }

    #[test]
    fn test_invalid_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "lists = [").unwrap();

        let err = PipacConfig::load(&path).unwrap_err();
        assert!(format!("{err}").contains(CONFIG_FILE));
    }
}
