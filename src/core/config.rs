//! Persisted settings and base URL resolution.
//!
//! The config file is small TOML under the platform config directory
//! (`~/.config/crmchat/config.toml` on Linux). Saves go through a
//! temporary file in the same directory so a crash mid-write can never
//! truncate an existing config.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Used when neither flag, environment, nor config file names a backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment override for the backend base URL.
pub const BASE_URL_ENV: &str = "CRMCHAT_BASE_URL";

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "could not read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "could not parse config {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::config_path())
    }

    /// Load from an explicit path. A missing file is an empty config, not
    /// an error; unreadable or malformed files are reported.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        self.save_to_path(&Self::config_path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let content = toml::to_string_pretty(self)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(path)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        match ProjectDirs::from("org", "crmchat", "crmchat") {
            Some(dirs) => dirs.config_dir().join("config.toml"),
            // No resolvable home directory; fall back to the working dir.
            None => PathBuf::from("crmchat.toml"),
        }
    }
}

/// Resolve the backend base URL: command-line flag, then the
/// `CRMCHAT_BASE_URL` environment variable, then the config file, then the
/// built-in default. Blank values at any level are treated as unset.
pub fn resolve_base_url(flag: Option<&str>, config: &Config) -> String {
    let env_value = std::env::var(BASE_URL_ENV).ok();
    resolve_base_url_from(flag, env_value.as_deref(), config)
}

fn resolve_base_url_from(flag: Option<&str>, env_value: Option<&str>, config: &Config) -> String {
    let candidates = [flag, env_value, config.base_url.as_deref()];
    for candidate in candidates {
        if let Some(value) = candidate {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }
    DEFAULT_BASE_URL.to_string()
}
