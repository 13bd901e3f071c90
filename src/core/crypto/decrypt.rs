// src/core/crypto/decrypt.rs
use std::time::Duration;

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use chrono::Utc;
use tracing::debug;

use super::token::{verify, CipherBundle, RawToken};
use crate::aliases::PlainText;
use crate::consts::MAX_CLOCK_SKEW_SECS;
use crate::core::key::SymmetricKey;
use crate::core::serialize::{deserialize, Payload};
use crate::core::Result;
use crate::error::CoreError;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Authenticate, decrypt and deserialize a bundle. No age limit.
pub fn decrypt(key: &SymmetricKey, bundle: &CipherBundle) -> Result<Payload> {
    decrypt_with_ttl(key, bundle, None)
}

/// Like [`decrypt`], rejecting bundles older than `ttl`
pub fn decrypt_with_ttl(
    key: &SymmetricKey,
    bundle: &CipherBundle,
    ttl: Option<Duration>,
) -> Result<Payload> {
    let plaintext = decrypt_to_vec(key, bundle, ttl)?;
    let payload = deserialize(plaintext.expose_secret())?;
    debug!(
        kind = payload.kind(),
        plaintext_len = plaintext.expose_secret().len(),
        "bundle decrypted"
    );
    Ok(payload)
}

/// Decrypt to the serialized bytes.
///
/// The tag is verified before anything is decrypted; nothing is returned
/// on failure.
pub fn decrypt_to_vec(
    key: &SymmetricKey,
    bundle: &CipherBundle,
    ttl: Option<Duration>,
) -> Result<PlainText> {
    let token = RawToken::decode(bundle.as_bytes())?;
    verify(key.signing_key(), token.signed(), token.tag())?;

    if let Some(ttl) = ttl {
        check_freshness(token.timestamp(), ttl, Utc::now().timestamp())?;
    }

    let plaintext = Aes128CbcDec::new_from_slices(key.encryption_key(), token.iv())
        .map_err(|_| CoreError::InvalidKey("bad encryption key length"))?
        .decrypt_padded_vec_mut::<Pkcs7>(token.ciphertext())
        .map_err(|_| CoreError::Authentication)?;

    Ok(PlainText::new(plaintext))
}

fn check_freshness(issued_at: i64, ttl: Duration, now: i64) -> Result<()> {
    let ttl_secs = ttl.as_secs();
    let max_age = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
    if issued_at.saturating_add(max_age) < now {
        return Err(CoreError::Expired {
            issued_at,
            ttl_secs,
        });
    }
    if now.saturating_add(MAX_CLOCK_SKEW_SECS) < issued_at {
        return Err(CoreError::Authentication);
    }
    Ok(())
}
