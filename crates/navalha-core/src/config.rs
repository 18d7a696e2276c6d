use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavalhaConfig {
    pub version: u32,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("navalha")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<NavalhaConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: NavalhaConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

pub fn validate_config(config: &NavalhaConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(ConfigError::Validation {
            message: "version must be 1".to_string(),
        });
    }

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::Validation {
            message: "api.base_url must be non-empty".to_string(),
        });
    }

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation {
            message: "api.base_url must start with http:// or https://".to_string(),
        });
    }

    if let Some(timeout_secs) = config.api.timeout_secs
        && timeout_secs == 0
    {
        return Err(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}
