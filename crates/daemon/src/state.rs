//! Application configuration and where it lives on disk

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "rmfs";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable holding the device refresh token
pub const REFRESH_TOKEN_ENV: &str = "RMFS_REFRESH_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Device refresh token, exchanged for a user token on every session
    pub refresh_token: Option<String>,
    /// Store-relative directory the view is rooted at
    pub root: String,
    /// Authentication service, defaults to the public one
    pub auth_url: Option<Url>,
    /// Document storage service, defaults to the public one
    pub storage_url: Option<Url>,
    /// Show the virtual Trash directory at the store root
    pub inject_trash: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_token: None,
            root: String::new(),
            auth_url: None,
            storage_url: None,
            inject_trash: true,
        }
    }
}

/// Loaded configuration plus the file it came from
#[derive(Debug, Clone)]
pub struct AppState {
    /// `None` when no file existed and defaults were used
    pub config_path: Option<PathBuf>,
    pub config: AppConfig,
}

impl AppState {
    /// `<config dir>/rmfs/config.toml`
    pub fn default_config_path() -> Result<PathBuf, StateError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
            .ok_or(StateError::NoConfigDir)
    }

    /// Load the config
    ///
    /// An explicitly given path must exist. The default location is optional;
    /// without a file there the defaults apply.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, StateError> {
        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(StateError::NotFound(path));
                }
                let config = Self::read(&path)?;
                Ok(Self {
                    config_path: Some(path),
                    config,
                })
            }
            None => {
                let path = Self::default_config_path()?;
                if !path.exists() {
                    tracing::debug!("no config at {}, using defaults", path.display());
                    return Ok(Self {
                        config_path: None,
                        config: AppConfig::default(),
                    });
                }
                let config = Self::read(&path)?;
                Ok(Self {
                    config_path: Some(path),
                    config,
                })
            }
        }
    }

    fn read(path: &Path) -> Result<AppConfig, StateError> {
        let raw = fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| StateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
