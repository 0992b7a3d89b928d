//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::catalog::{Catalog, WorkshopEntry};
use crate::core::draft::scalar_strings;

/// File name of the per-directory config
pub const PROJECT_CONFIG_FILE: &str = "signup.yaml";

/// Environment variable overriding the intake directory
pub const INTAKE_DIR_ENV: &str = "SIGNUP_INTAKE_DIR";

/// Signup configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory where submitted registrations are stored
    pub intake_dir: Option<PathBuf>,

    /// Allowed graduation years
    #[serde(deserialize_with = "scalar_strings")]
    pub graduation_years: Option<Vec<String>>,

    /// Workshop catalog replacing the built-in one
    pub workshops: Option<Vec<WorkshopEntry>>,
}

/// Errors loading an explicitly requested config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// Discovered files that fail to parse are skipped; an explicit file that
    /// fails to load is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/signup/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_discovered(&global_path);
        }

        // 3. Directory config (./signup.yaml)
        config.merge_discovered(&Self::project_config_path());

        // 4. Explicit --config file
        if let Some(path) = explicit {
            config.merge(Self::from_path(path)?);
        }

        // 5. Environment variables
        config.merge_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Read a single config file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "signup")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to the config file in the current directory
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE)
    }

    fn merge_discovered(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::from_path(path) {
            Ok(found) => {
                tracing::debug!(path = %path.display(), "loaded config");
                self.merge(found);
            }
            Err(e) => tracing::warn!(error = %e, "ignoring config file"),
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.intake_dir.is_some() {
            self.intake_dir = other.intake_dir;
        }
        if other.graduation_years.is_some() {
            self.graduation_years = other.graduation_years;
        }
        if other.workshops.is_some() {
            self.workshops = other.workshops;
        }
    }

    fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(INTAKE_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.intake_dir = Some(PathBuf::from(dir));
        }
    }

    /// Build the catalog, falling back to built-in lists
    pub fn catalog(&self) -> Catalog {
        Catalog::new(
            self.workshops
                .clone()
                .unwrap_or_else(Catalog::default_workshops),
            self.graduation_years
                .clone()
                .unwrap_or_else(Catalog::default_graduation_years),
        )
    }

    /// Get the intake directory, falling back to the user data dir
    pub fn intake_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.intake_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "signup")
            .map(|dirs| dirs.data_dir().join("registrations"))
            .unwrap_or_else(|| PathBuf::from("registrations"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_give_builtin_catalog() {
        let config = Config::default();
        assert_eq!(config.catalog(), Catalog::default());
    }

    #[test]
    fn test_from_path_overrides_catalog() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("signup.yaml");
        std::fs::write(
            &path,
            "intake_dir: /tmp/regs\n\
             graduation_years: [\"2029\", \"2030\"]\n\
             workshops:\n  - id: rust\n    label: Rust in Practice\n",
        )
        .unwrap();

        let config = Config::from_path(&path).unwrap();
        let catalog = config.catalog();
        assert_eq!(config.intake_dir(), PathBuf::from("/tmp/regs"));
        assert!(catalog.has_workshop("rust"));
        assert!(!catalog.has_workshop("ai"));
        assert!(catalog.has_graduation_year("2030"));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("signup.yaml");
        std::fs::write(&path, "graduation_years: [\"2031\"]\n").unwrap();

        let catalog = Config::from_path(&path).unwrap().catalog();
        assert_eq!(catalog.workshops().len(), 5);
        assert_eq!(catalog.graduation_years(), &["2031".to_string()]);
    }

    #[test]
    fn test_unquoted_graduation_years() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("signup.yaml");
        std::fs::write(&path, "graduation_years: [2029, 2030]\n").unwrap();

        let catalog = Config::from_path(&path).unwrap().catalog();
        assert_eq!(
            catalog.graduation_years(),
            &["2029".to_string(), "2030".to_string()]
        );
        assert!(catalog.has_graduation_year("2030"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("signup.yaml");
        std::fs::write(&path, "workshops: 12\n").unwrap();
        assert!(matches!(
            Config::from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_merge_precedence() {
        let mut base = Config {
            intake_dir: Some(PathBuf::from("a")),
            graduation_years: Some(vec!["2024".to_string()]),
            workshops: None,
        };
        base.merge(Config {
            intake_dir: Some(PathBuf::from("b")),
            ..Config::default()
        });
        assert_eq!(base.intake_dir, Some(PathBuf::from("b")));
        assert_eq!(base.graduation_years, Some(vec!["2024".to_string()]));
    }

    #[test]
    fn test_env_overrides_intake_dir() {
        let mut config = Config {
            intake_dir: Some(PathBuf::from("from-file")),
            ..Config::default()
        };
        config.merge_env(|key| (key == INTAKE_DIR_ENV).then(|| "from-env".to_string()));
        assert_eq!(config.intake_dir(), PathBuf::from("from-env"));

        config.merge_env(|_| Some("  ".to_string()));
        assert_eq!(config.intake_dir(), PathBuf::from("from-env"));
    }
}
