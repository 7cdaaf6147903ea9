use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_PATH: &str = "~/default.name";

/// How a missing file gets created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Open with exclusive create and write in place.
    #[default]
    Exclusive,
    /// Write a sibling temp file, then link it into place without clobbering.
    Atomic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedfileConfig {
    /// Path used when the request carries no path (supports ~ expansion)
    pub default_path: String,
    pub write_mode: WriteMode,
}

impl Default for SeedfileConfig {
    fn default() -> Self {
        Self {
            default_path: DEFAULT_PATH.to_string(),
            write_mode: WriteMode::default(),
        }
    }
}

impl SeedfileConfig {
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home.join(".seedfile.config"))
    }

    pub fn load_from(path: &Path) -> Result<SeedfileConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SeedfileConfig = serde_json::from_str(&content)?;
        debug!(target: "seedfile::config", path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Load the per-user config, falling back to defaults when there is none.
    pub fn load_or_default() -> Result<SeedfileConfig, ConfigError> {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(ConfigError::NoHome) => return Ok(Self::default()),
            Err(e) => return Err(e),
        };

        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = SeedfileConfig::default();
        assert_eq!(config.default_path, "~/default.name");
        assert_eq!(config.write_mode, WriteMode::Exclusive);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seedfile.json");
        fs::write(&path, r#"{"default_path": "/srv/marker", "write_mode": "atomic"}"#).unwrap();

        let config = SeedfileConfig::load_from(&path).unwrap();
        assert_eq!(config.default_path, "/srv/marker");
        assert_eq!(config.write_mode, WriteMode::Atomic);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seedfile.json");
        fs::write(&path, r#"{"write_mode": "atomic"}"#).unwrap();

        let config = SeedfileConfig::load_from(&path).unwrap();
        assert_eq!(config.default_path, DEFAULT_PATH);
        assert_eq!(config.write_mode, WriteMode::Atomic);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seedfile.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(SeedfileConfig::load_from(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = SeedfileConfig::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
