// src/core/key.rs
//! Key generation and encoding
//!
//! A key is 32 random bytes: the first half signs tokens (HMAC-SHA256),
//! the second half encrypts them (AES-128-CBC). On disk it is stored as
//! padded URL-safe base64, the same text form other Fernet
//! implementations read and write.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use secure_gate::SecureRandomExt;

use crate::aliases::{FernetKey32, RandomKey32, RawKeyBytes};
use crate::consts::{ENCODED_KEY_LEN, KEY_HALF_LEN, KEY_LEN};
use crate::core::Result;
use crate::error::CoreError;

/// Secret key for one bundle; zeroized on drop
pub struct SymmetricKey(FernetKey32);

impl SymmetricKey {
    /// Fresh key from secure-gate's CSPRNG-backed generator
    pub fn generate() -> Self {
        let random = RandomKey32::new();
        Self::from_bytes(*random.expose_secret())
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(FernetKey32::new(bytes))
    }

    /// Parse the persisted text form. Surrounding whitespace is ignored.
    pub fn decode(encoded: &[u8]) -> Result<Self> {
        let trimmed = encoded.trim_ascii();
        if trimmed.len() != ENCODED_KEY_LEN {
            return Err(CoreError::InvalidKey("expected 44 base64 characters"));
        }
        let raw = RawKeyBytes::new(
            URL_SAFE
                .decode(trimmed)
                .map_err(|_| CoreError::InvalidKey("not url-safe base64"))?,
        );
        let bytes: [u8; KEY_LEN] = raw
            .expose_secret()
            .as_slice()
            .try_into()
            .map_err(|_| CoreError::InvalidKey("expected 32 key bytes"))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Padded URL-safe base64, suitable for writing to the key file
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.0.expose_secret())
    }

    pub(crate) fn signing_key(&self) -> &[u8] {
        &self.0.expose_secret()[..KEY_HALF_LEN]
    }

    pub(crate) fn encryption_key(&self) -> &[u8] {
        &self.0.expose_secret()[KEY_HALF_LEN..]
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Generate a new random key
#[inline]
pub fn generate_key() -> SymmetricKey {
    SymmetricKey::generate()
}
