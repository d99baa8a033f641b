//! Settings file (`config.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_store_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("contacts.json"),
        |p| p.join("Roster").join("contacts.json"),
    )
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Toolkit settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Contact store file
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Reconcile contacts in parallel
    #[serde(default)]
    pub parallel: bool,
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            parallel: false,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("Roster").join("config.toml"))
    }

    /// Load settings from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) if !path.is_file() => return Err(Error::ConfigNotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        tracing::debug!("Loading config from {}", path.display());
        Self::from_toml_str(&fs::read_to_string(&path)?)
    }

    /// Parse settings from TOML text; `~/` in the store path is expanded.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(content)?;
        settings.store_path = expand_tilde(&settings.store_path);
        Ok(settings)
    }

    /// Write settings as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_config() {
        let settings = Settings::from_toml_str(
            r#"
            store_path = "/tmp/roster/contacts.json"
            parallel = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.store_path, PathBuf::from("/tmp/roster/contacts.json"));
        assert!(settings.parallel);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_bad_config_is_error() {
        let err = Settings::from_toml_str("parallel = \"sometimes\"").unwrap_err();
        assert!(matches!(err, Error::TomlDe(_)));
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = Settings::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let settings = Settings {
            store_path: dir.path().join("contacts.json"),
            parallel: true,
            log_level: "debug".to_string(),
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(Some(&path)).unwrap(), settings);
    }

    #[test]
    fn test_expand_tilde() {
        let plain = Path::new("/abs/contacts.json");
        assert_eq!(expand_tilde(plain), plain.to_path_buf());
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/contacts.json")), home.join("contacts.json"));
        }
    }
}
