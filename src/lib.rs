// src/lib.rs
//! dictocrypt — encrypt small secrets to disk, decrypt them back
//!
//! Features:
//! - Fernet tokens (AES-128-CBC + HMAC-SHA256), interoperable with other
//!   Fernet implementations
//! - Text or JSON-structured payloads
//! - Key and ciphertext persisted as two independent files
//! - secure-gate key containers, zeroized on drop

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod error;
pub mod storage;

// Re-export everything users need at the crate root
pub use self::config::{load as load_config, Config};
pub use self::core::{
    decrypt, decrypt_from_files, decrypt_with_ttl, deserialize, encrypt, encrypt_to_files,
    generate_key, serialize, CipherBundle, Payload, Result as CoreResult, SymmetricKey,
};
pub use error::CoreError;
pub use storage::{FsStorage, NamingPolicy, SecretFiles, Storage};
