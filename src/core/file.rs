// src/core/file.rs
//! Encrypt to / decrypt from a key file and a bundle file
//!
//! Builds on the pure primitives in `crypto`, delegating all disk access
//! to a [`Storage`] implementation.

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::core::crypto::{decrypt_with_ttl, encrypt, CipherBundle};
use crate::core::key::SymmetricKey;
use crate::core::serialize::Payload;
use crate::core::Result;
use crate::error::CoreError;
use crate::storage::{NamingPolicy, SecretFiles, Storage};

/// Encrypt `payload` under a fresh key and persist both artifacts.
///
/// `save_dir` defaults to the current working directory and must already
/// exist. The key file is written first, through
/// [`Storage::write_secret`]; if the bundle write then fails the key file
/// is removed again so no orphaned key is left behind.
pub fn encrypt_to_files<S: Storage + ?Sized>(
    payload: &Payload,
    save_dir: Option<&Path>,
    naming: &NamingPolicy,
    storage: &S,
) -> Result<SecretFiles> {
    let dir = match save_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    if !dir.is_dir() {
        return Err(CoreError::InvalidPath(dir));
    }

    let (key, bundle) = encrypt(payload, None)?;
    let files = naming.paths_in(&dir);

    storage.write_secret(&files.key_path, key.encode().as_bytes())?;
    info!(path = %files.key_path.display(), "key saved");

    if let Err(err) = storage.write(&files.bundle_path, bundle.as_bytes()) {
        if let Err(cleanup) = storage.remove(&files.key_path) {
            warn!(path = %files.key_path.display(), error = %cleanup, "orphaned key file not removed");
        }
        return Err(err);
    }
    info!(path = %files.bundle_path.display(), "bundle saved");

    Ok(files)
}

/// Load a key file and a bundle file and recover the payload
pub fn decrypt_from_files<S: Storage + ?Sized>(
    key_path: &Path,
    bundle_path: &Path,
    ttl: Option<Duration>,
    storage: &S,
) -> Result<Payload> {
    let key = SymmetricKey::decode(&storage.read(key_path)?)?;
    let bundle = CipherBundle::from_bytes(storage.read(bundle_path)?);
    decrypt_with_ttl(&key, &bundle, ttl)
}

/// Both paths from one [`SecretFiles`] pair
pub fn decrypt_files<S: Storage + ?Sized>(
    files: &SecretFiles,
    ttl: Option<Duration>,
    storage: &S,
) -> Result<Payload> {
    decrypt_from_files(&files.key_path, &files.bundle_path, ttl, storage)
}
