// src/config/defaults.rs
use crate::config::app::StorageSettings;
use crate::consts::{DEFAULT_DESCRIPTION, DEFAULT_EXTENSION, DEFAULT_KEY_SUFFIX};

pub const DEFAULT_RESTRICT_KEY_PERMISSIONS: bool = true;

pub fn default_storage() -> StorageSettings {
    StorageSettings {
        save_dir: None,
        description: DEFAULT_DESCRIPTION.into(),
        key_suffix: DEFAULT_KEY_SUFFIX.into(),
        extension: DEFAULT_EXTENSION.into(),
        restrict_key_permissions: DEFAULT_RESTRICT_KEY_PERMISSIONS,
    }
}
