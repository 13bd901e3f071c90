// src/config/app.rs
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::default_storage;
use crate::consts::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::core::Result;
use crate::storage::{FsStorage, NamingPolicy};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSettings,
    pub decrypt: DecryptSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where new secrets are written; `None` means the working directory
    pub save_dir: Option<PathBuf>,
    pub description: String,
    pub key_suffix: String,
    pub extension: String,
    pub restrict_key_permissions: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        default_storage()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DecryptSettings {
    /// Maximum bundle age; unset accepts any age
    pub ttl_secs: Option<u64>,
}

impl Config {
    pub fn naming_policy(&self) -> NamingPolicy {
        NamingPolicy {
            description: self.storage.description.clone(),
            key_suffix: self.storage.key_suffix.clone(),
            extension: self.storage.extension.clone(),
        }
    }

    pub fn fs_storage(&self) -> FsStorage {
        FsStorage::new(self.storage.restrict_key_permissions)
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.decrypt.ttl_secs.map(Duration::from_secs)
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once — falls back to defaults if no file exists
pub fn load() -> Result<&'static Config> {
    if let Some(conf) = CONFIG.get() {
        return Ok(conf);
    }

    let conf = match config_path() {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "loading config");
            load_from(&path)?
        }
        Some(path) => {
            if std::env::var_os(CONFIG_ENV_VAR).is_some() {
                warn!(path = %path.display(), "config file not found — using built-in defaults");
            }
            Config::default()
        }
        None => Config::default(),
    };

    Ok(CONFIG.get_or_init(|| conf))
}

/// `$DICTOCRYPT_CONFIG`, else `<config dir>/dictocrypt/config.toml`
pub fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => Some(PathBuf::from(path)),
        None => dirs::config_dir().map(|dir| dir.join("dictocrypt").join(CONFIG_FILE_NAME)),
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}
