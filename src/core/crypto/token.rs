// src/core/crypto/token.rs
//! Opaque bundle type plus the parsed view used during decryption

use std::fmt;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::consts::{
    BLOCK_LEN, HEADER_LEN, HMAC_LEN, MIN_TOKEN_LEN, TIMESTAMP_LEN, TOKEN_VERSION,
};
use crate::core::Result;
use crate::error::CoreError;

type HmacSha256 = Hmac<Sha256>;

/// Encrypted artifact as persisted: the base64 token text
#[derive(Clone, PartialEq, Eq)]
pub struct CipherBundle(Vec<u8>);

impl CipherBundle {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Issue time embedded in the token.
    ///
    /// Read without a key, so it is not authenticated.
    pub fn timestamp(&self) -> Result<DateTime<Utc>> {
        let token = RawToken::decode(&self.0)?;
        DateTime::<Utc>::from_timestamp(token.timestamp(), 0)
            .ok_or(CoreError::MalformedBundle("timestamp out of range"))
    }
}

impl AsRef<[u8]> for CipherBundle {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CipherBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherBundle({} bytes)", self.0.len())
    }
}

/// Decoded token, structurally validated but not yet authenticated
pub(crate) struct RawToken {
    data: Vec<u8>,
}

impl RawToken {
    pub(crate) fn decode(encoded: &[u8]) -> Result<Self> {
        let trimmed = encoded.trim_ascii();
        if trimmed.is_empty() {
            return Err(CoreError::MalformedBundle("empty bundle"));
        }
        let data = URL_SAFE
            .decode(trimmed)
            .map_err(|_| CoreError::MalformedBundle("not url-safe base64"))?;
        Self::from_raw(data)
    }

    pub(crate) fn from_raw(data: Vec<u8>) -> Result<Self> {
        if data.len() < MIN_TOKEN_LEN {
            return Err(CoreError::MalformedBundle("truncated token"));
        }
        if data[0] != TOKEN_VERSION {
            return Err(CoreError::MalformedBundle("unsupported version byte"));
        }
        if (data.len() - HEADER_LEN - HMAC_LEN) % BLOCK_LEN != 0 {
            return Err(CoreError::MalformedBundle("ciphertext is not block aligned"));
        }
        Ok(Self { data })
    }

    /// Seconds since the epoch; values beyond `i64::MAX` saturate
    pub(crate) fn timestamp(&self) -> i64 {
        let mut be = [0u8; TIMESTAMP_LEN];
        be.copy_from_slice(&self.data[1..1 + TIMESTAMP_LEN]);
        i64::try_from(u64::from_be_bytes(be)).unwrap_or(i64::MAX)
    }

    pub(crate) fn iv(&self) -> &[u8] {
        &self.data[1 + TIMESTAMP_LEN..HEADER_LEN]
    }

    pub(crate) fn ciphertext(&self) -> &[u8] {
        &self.data[HEADER_LEN..self.tag_start()]
    }

    pub(crate) fn signed(&self) -> &[u8] {
        &self.data[..self.tag_start()]
    }

    pub(crate) fn tag(&self) -> &[u8] {
        &self.data[self.tag_start()..]
    }

    fn tag_start(&self) -> usize {
        self.data.len() - HMAC_LEN
    }
}

pub(crate) fn sign(signing_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(signing_key)
        .map_err(|_| CoreError::InvalidKey("bad signing key length"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Constant-time tag check
pub(crate) fn verify(signing_key: &[u8], data: &[u8], tag: &[u8]) -> Result<()> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(signing_key)
        .map_err(|_| CoreError::InvalidKey("bad signing key length"))?;
    mac.update(data);
    mac.verify_slice(tag).map_err(|_| CoreError::Authentication)
}
