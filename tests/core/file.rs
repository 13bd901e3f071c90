// tests/core/file.rs
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use dictocrypt::core::{decrypt_files, decrypt_from_files, encrypt_to_files, Payload};
use dictocrypt::error::CoreError;
use dictocrypt::storage::{FsStorage, NamingPolicy, Storage};
use dictocrypt::CoreResult;
use serde_json::json;
use tempfile::tempdir;

#[derive(Default)]
struct MemoryStorage {
    blobs: RefCell<HashMap<PathBuf, Vec<u8>>>,
    secret_writes: RefCell<Vec<PathBuf>>,
}

impl Storage for MemoryStorage {
    fn write(&self, path: &Path, content: &[u8]) -> CoreResult<()> {
        self.blobs
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read(&self, path: &Path) -> CoreResult<Vec<u8>> {
        self.blobs
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound).into())
    }

    fn remove(&self, path: &Path) -> CoreResult<()> {
        self.blobs.borrow_mut().remove(path);
        Ok(())
    }

    fn write_secret(&self, path: &Path, content: &[u8]) -> CoreResult<()> {
        self.secret_writes.borrow_mut().push(path.to_path_buf());
        self.write(path, content)
    }
}

#[test]
fn test_encrypt_to_files_and_back_with_default_names() {
    crate::common::setup();
    let dir = tempdir().unwrap();
    let payload = Payload::from(json!({"api_key": "abc123"}));

    let files = encrypt_to_files(
        &payload,
        Some(dir.path()),
        &NamingPolicy::default(),
        &FsStorage::default(),
    )
    .unwrap();

    assert_eq!(files.key_path, dir.path().join("secretfile-key.txt"));
    assert_eq!(files.bundle_path, dir.path().join("secretfile.txt"));
    assert_eq!(fs::read(&files.key_path).unwrap().len(), 44);
    assert!(fs::read(&files.bundle_path).unwrap().starts_with(b"gAAAAA"));

    let decrypted =
        decrypt_from_files(&files.key_path, &files.bundle_path, None, &FsStorage::default())
            .unwrap();
    assert_eq!(decrypted, payload);
}

#[test]
fn test_custom_description_names_both_files() {
    let dir = tempdir().unwrap();
    let naming = NamingPolicy::with_description("github-token");

    let files = encrypt_to_files(
        &Payload::text("ghp_123"),
        Some(dir.path()),
        &naming,
        &FsStorage::default(),
    )
    .unwrap();

    assert!(dir.path().join("github-token-key.txt").is_file());
    assert!(dir.path().join("github-token.txt").is_file());
    assert_eq!(
        decrypt_files(&files, None, &FsStorage::default()).unwrap(),
        Payload::text("ghp_123")
    );
}

#[test]
fn test_missing_directory_is_invalid_path_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = encrypt_to_files(
        &Payload::text("secret"),
        Some(&missing),
        &NamingPolicy::default(),
        &FsStorage::default(),
    );

    assert!(matches!(result, Err(CoreError::InvalidPath(p)) if p == missing));
    assert!(!missing.exists());
}

#[test]
fn test_file_instead_of_directory_is_invalid_path() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, b"x").unwrap();

    let result = encrypt_to_files(
        &Payload::text("secret"),
        Some(&file),
        &NamingPolicy::default(),
        &FsStorage::default(),
    );
    assert!(matches!(result, Err(CoreError::InvalidPath(_))));
}

#[test]
fn test_mismatched_key_file_fails_authentication() {
    let dir = tempdir().unwrap();
    let storage = FsStorage::default();
    let first = encrypt_to_files(
        &Payload::text("one"),
        Some(dir.path()),
        &NamingPolicy::with_description("one"),
        &storage,
    )
    .unwrap();
    let second = encrypt_to_files(
        &Payload::text("two"),
        Some(dir.path()),
        &NamingPolicy::with_description("two"),
        &storage,
    )
    .unwrap();

    let result = decrypt_from_files(&second.key_path, &first.bundle_path, None, &storage);
    assert!(matches!(result, Err(CoreError::Authentication)));
}

#[test]
fn test_missing_bundle_file_is_io_error() {
    let dir = tempdir().unwrap();
    let files = encrypt_to_files(
        &Payload::text("secret"),
        Some(dir.path()),
        &NamingPolicy::default(),
        &FsStorage::default(),
    )
    .unwrap();
    fs::remove_file(&files.bundle_path).unwrap();

    let result = decrypt_files(&files, None, &FsStorage::default());
    assert!(matches!(result, Err(CoreError::Io(_))));
}

/// Accepts key writes, refuses everything else
#[derive(Default)]
struct BundleRejectingStorage {
    inner: MemoryStorage,
}

impl Storage for BundleRejectingStorage {
    fn write(&self, _path: &Path, _content: &[u8]) -> CoreResult<()> {
        Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into())
    }

    fn read(&self, path: &Path) -> CoreResult<Vec<u8>> {
        self.inner.read(path)
    }

    fn remove(&self, path: &Path) -> CoreResult<()> {
        self.inner.remove(path)
    }

    fn write_secret(&self, path: &Path, content: &[u8]) -> CoreResult<()> {
        self.inner.write_secret(path, content)
    }
}

#[test]
fn test_failed_bundle_write_removes_key_from_storage() {
    let dir = tempdir().unwrap();
    let storage = BundleRejectingStorage::default();

    let result = encrypt_to_files(
        &Payload::text("secret"),
        Some(dir.path()),
        &NamingPolicy::default(),
        &storage,
    );

    assert!(matches!(result, Err(CoreError::Io(_))));
    assert_eq!(storage.inner.secret_writes.borrow().len(), 1);
    assert!(storage.inner.blobs.borrow().is_empty());
}

#[test]
fn test_failed_bundle_write_leaves_no_key_file_on_disk() {
    let dir = tempdir().unwrap();
    let naming = NamingPolicy::default();
    let files = naming.paths_in(dir.path());
    // A non-empty directory where the bundle should go makes the rename fail
    fs::create_dir(&files.bundle_path).unwrap();
    fs::write(files.bundle_path.join("occupied"), b"x").unwrap();

    let result = encrypt_to_files(
        &Payload::text("secret"),
        Some(dir.path()),
        &naming,
        &FsStorage::default(),
    );

    assert!(matches!(result, Err(CoreError::Io(_))));
    assert!(!files.key_path.exists());
    assert!(files.bundle_path.is_dir());
}

#[test]
fn test_custom_storage_receives_key_as_secret() {
    let dir = tempdir().unwrap();
    let storage = MemoryStorage::default();

    let files = encrypt_to_files(
        &Payload::text("in memory"),
        Some(dir.path()),
        &NamingPolicy::default(),
        &storage,
    )
    .unwrap();

    assert_eq!(*storage.secret_writes.borrow(), vec![files.key_path.clone()]);
    assert!(!files.key_path.exists());
    assert_eq!(
        decrypt_files(&files, None, &storage).unwrap(),
        Payload::text("in memory")
    );
}

#[cfg(unix)]
#[test]
fn test_key_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let files = encrypt_to_files(
        &Payload::text("secret"),
        Some(dir.path()),
        &NamingPolicy::default(),
        &FsStorage::default(),
    )
    .unwrap();

    let key_mode = fs::metadata(&files.key_path).unwrap().permissions().mode();
    let bundle_mode = fs::metadata(&files.bundle_path).unwrap().permissions().mode();
    assert_eq!(key_mode & 0o777, 0o600);
    assert_eq!(bundle_mode & 0o777, 0o644);
}

#[cfg(unix)]
#[test]
fn test_key_permissions_can_be_left_open() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let files = encrypt_to_files(
        &Payload::text("secret"),
        Some(dir.path()),
        &NamingPolicy::default(),
        &FsStorage::new(false),
    )
    .unwrap();

    let key_mode = fs::metadata(&files.key_path).unwrap().permissions().mode();
    assert_eq!(key_mode & 0o777, 0o644);
}
