// src/core/crypto/mod.rs
//! Pure cryptographic operations — no I/O
//!
//! All functions work exclusively on in-memory buffers. The token layout
//! is Fernet: `0x80 || timestamp || iv || AES-128-CBC ciphertext || HMAC`,
//! URL-safe base64 encoded.
mod decrypt;
mod encrypt;
mod token;

pub use decrypt::{decrypt, decrypt_to_vec, decrypt_with_ttl};
pub use encrypt::{encrypt, encrypt_at, encrypt_bytes};
pub use token::CipherBundle;
