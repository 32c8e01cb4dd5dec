//! Configuration module
//!
//! `config.json` holds the locations of the permanent backup copies.
//! The working copies always live in the workspace directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::activity::LOG_FILE_NAME;
use crate::core::data::DATA_FILE_NAME;
use crate::core::error::{RecordsError, Result};

/// Default config file name, relative to the workspace directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Locations of the permanent backup copies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backup_location")]
    pub permanent_backup_location: PathBuf,

    #[serde(default = "default_log_location")]
    pub permanent_log_location_dir: PathBuf,

    /// Keys this program does not know about, kept on rewrite.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            permanent_backup_location: default_backup_location(),
            permanent_log_location_dir: default_log_location(),
            extra: serde_json::Map::new(),
        }
    }
}

/// `~/Backup`, or `./Backup` when there is no home directory.
pub fn default_backup_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|u| u.home_dir().join("Backup"))
        .unwrap_or_else(|| PathBuf::from("Backup"))
}

fn default_backup_location() -> PathBuf {
    default_backup_dir().join(DATA_FILE_NAME)
}

fn default_log_location() -> PathBuf {
    default_backup_dir().join(LOG_FILE_NAME)
}

impl Config {
    /// Load config from `path`, writing the default first when missing.
    ///
    /// The flag is `true` when the file was just created.
    pub fn load_or_create(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            return Ok((Self::load_from(path)?, false));
        }

        let config = Self::default();
        config.save_to(path)?;
        info!(path = %path.display(), "created default config");
        Ok((config, true))
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| RecordsError::io("config file", path, e))?;
        let config = serde_json::from_str(&content).map_err(|source| {
            RecordsError::MalformedConfig {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|source| {
            RecordsError::MalformedConfig {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| RecordsError::io("config file", parent, e))?;
            }
        }
        fs::write(path, content).map_err(|e| RecordsError::io("config file", path, e))?;
        Ok(())
    }

    /// Same config with both permanent files pointing at new locations.
    pub fn with_permanent(&self, data: PathBuf, log: PathBuf) -> Self {
        Self {
            permanent_backup_location: data,
            permanent_log_location_dir: log,
            extra: self.extra.clone(),
        }
    }
}

/// Where the working copies and the config file live.
#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
    config_file: PathBuf,
}

impl Workspace {
    /// `config_file` defaults to `config.json` inside `dir`.
    pub fn new(dir: impl Into<PathBuf>, config_file: Option<PathBuf>) -> Self {
        let dir = dir.into();
        let config_file = config_file.unwrap_or_else(|| dir.join(CONFIG_FILE_NAME));
        Self { dir, config_file }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.join(DATA_FILE_NAME)
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_or_create_writes_default() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let (config, created) = Config::load_or_create(&path)?;
        assert!(created);
        assert!(path.exists());
        assert!(config.permanent_backup_location.ends_with(DATA_FILE_NAME));
        assert!(config.permanent_log_location_dir.ends_with(LOG_FILE_NAME));

        let (again, created) = Config::load_or_create(&path)?;
        assert!(!created);
        assert_eq!(again, config);
        Ok(())
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, RecordsError::MalformedConfig { .. }));
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "permanent_backup_location": "/srv/backup/data.txt" }"#).unwrap();

        let config = Config::load_from(&path)?;
        assert_eq!(
            config.permanent_backup_location,
            PathBuf::from("/srv/backup/data.txt")
        );
        assert!(config.permanent_log_location_dir.ends_with(LOG_FILE_NAME));
        Ok(())
    }

    #[test]
    fn test_unknown_keys_survive_rewrite() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{
                "permanent_backup_location": "/a/data.txt",
                "permanent_log_location_dir": "/a/log.pkl",
                "owner": "platform-team"
            }"#,
        )
        .unwrap();

        let config = Config::load_from(&path)?
            .with_permanent(PathBuf::from("/b/data.txt"), PathBuf::from("/b/log.pkl"));
        config.save_to(&path)?;

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["owner"], "platform-team");
        assert_eq!(raw["permanent_backup_location"], "/b/data.txt");
        Ok(())
    }

    #[test]
    fn test_workspace_paths() {
        let ws = Workspace::new("/work", None);
        assert_eq!(ws.config_file(), Path::new("/work/config.json"));
        assert_eq!(ws.data_file(), PathBuf::from("/work/DataSwaggerRecords.txt"));
        assert_eq!(ws.log_file(), PathBuf::from("/work/log_SwaggerRecords.pkl"));

        let ws = Workspace::new("/work", Some(PathBuf::from("/etc/swagrec.json")));
        assert_eq!(ws.config_file(), Path::new("/etc/swagrec.json"));
    }
}
