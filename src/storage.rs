// src/storage.rs
//! Storage collaborator: opaque byte blobs in, opaque byte blobs out
//!
//! The core never touches the filesystem directly. [`FsStorage`] is the
//! default implementation; [`NamingPolicy`] decides where a secret's two
//! files live.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::consts::{DEFAULT_DESCRIPTION, DEFAULT_EXTENSION, DEFAULT_KEY_SUFFIX};
use crate::core::Result;
use crate::error::CoreError;

pub trait Storage {
    /// Persist `content` at `path`. Fails if the parent directory is missing.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;

    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    fn remove(&self, path: &Path) -> Result<()>;

    /// Persist key material. Implementations may tighten access.
    fn write_secret(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.write(path, content)
    }
}

/// Local filesystem storage with atomic replace-on-write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStorage {
    restrict_key_permissions: bool,
}

impl FsStorage {
    pub fn new(restrict_key_permissions: bool) -> Self {
        Self {
            restrict_key_permissions,
        }
    }

    pub fn restricts_key_permissions(&self) -> bool {
        self.restrict_key_permissions
    }

    fn write_atomic(&self, path: &Path, content: &[u8], private: bool) -> Result<()> {
        let dir = existing_parent(path)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        set_mode(tmp.path(), private)?;
        tmp.persist(path).map_err(|e| CoreError::Io(e.error))?;
        Ok(())
    }
}

impl Default for FsStorage {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Storage for FsStorage {
    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.write_atomic(path, content, false)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        Ok(fs::remove_file(path)?)
    }

    fn write_secret(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.write_atomic(path, content, self.restrict_key_permissions)
    }
}

fn existing_parent(path: &Path) -> Result<&Path> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(CoreError::InvalidPath(parent.to_path_buf()));
    }
    Ok(parent)
}

// Temp files start out 0o600; widen them unless the content is a key.
#[cfg(unix)]
fn set_mode(path: &Path, private: bool) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    use crate::consts::KEY_FILE_MODE;

    let mode = if private { KEY_FILE_MODE } else { 0o644 };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _private: bool) -> Result<()> {
    Ok(())
}

/// How a secret's key file and bundle file are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    pub description: String,
    pub key_suffix: String,
    pub extension: String,
}

impl NamingPolicy {
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// `{description}{key_suffix}.{extension}`
    pub fn key_file_name(&self) -> String {
        self.file_name(&format!("{}{}", self.description, self.key_suffix))
    }

    /// `{description}.{extension}`
    pub fn bundle_file_name(&self) -> String {
        self.file_name(&self.description)
    }

    pub fn paths_in(&self, dir: &Path) -> SecretFiles {
        SecretFiles {
            key_path: dir.join(self.key_file_name()),
            bundle_path: dir.join(self.bundle_file_name()),
        }
    }

    fn file_name(&self, stem: &str) -> String {
        if self.extension.is_empty() {
            stem.to_owned()
        } else {
            format!("{stem}.{}", self.extension)
        }
    }
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.into(),
            key_suffix: DEFAULT_KEY_SUFFIX.into(),
            extension: DEFAULT_EXTENSION.into(),
        }
    }
}

/// Locations of one secret's artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretFiles {
    pub key_path: PathBuf,
    pub bundle_path: PathBuf,
}
