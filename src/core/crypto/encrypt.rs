// src/core/crypto/encrypt.rs
use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chrono::Utc;
use rand::RngCore;
use tracing::debug;

use super::token::{sign, CipherBundle};
use crate::consts::{HEADER_LEN, HMAC_LEN, IV_LEN, TOKEN_VERSION};
use crate::core::key::SymmetricKey;
use crate::core::serialize::{serialize, Payload};
use crate::core::Result;
use crate::error::CoreError;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;

/// Serialize and encrypt a payload.
///
/// Generates a fresh key when none is supplied; the key used is always
/// handed back alongside the bundle.
pub fn encrypt(
    payload: &Payload,
    key: Option<SymmetricKey>,
) -> Result<(SymmetricKey, CipherBundle)> {
    let key = key.unwrap_or_else(SymmetricKey::generate);
    let plaintext = serialize(payload)?;
    let bundle = encrypt_bytes(&plaintext, &key)?;
    debug!(
        kind = payload.kind(),
        plaintext_len = plaintext.len(),
        bundle_len = bundle.len(),
        "payload encrypted"
    );
    Ok((key, bundle))
}

/// Encrypt raw bytes with a random IV, stamped with the current time
pub fn encrypt_bytes(plaintext: &[u8], key: &SymmetricKey) -> Result<CipherBundle> {
    let mut iv = [0u8; IV_LEN];
    rand::rng().fill_bytes(&mut iv);
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
    encrypt_at(plaintext, key, now, &iv)
}

/// Encrypt with a caller-chosen timestamp and IV.
///
/// Never reuse an IV under the same key; this exists for known-answer
/// vectors and interop checks.
pub fn encrypt_at(
    plaintext: &[u8],
    key: &SymmetricKey,
    timestamp: u64,
    iv: &[u8; IV_LEN],
) -> Result<CipherBundle> {
    let ciphertext = Aes128CbcEnc::new_from_slices(key.encryption_key(), iv)
        .map_err(|_| CoreError::InvalidKey("bad encryption key length"))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut data = Vec::with_capacity(HEADER_LEN + ciphertext.len() + HMAC_LEN);
    data.push(TOKEN_VERSION);
    data.extend_from_slice(&timestamp.to_be_bytes());
    data.extend_from_slice(iv);
    data.extend_from_slice(&ciphertext);
    let tag = sign(key.signing_key(), &data)?;
    data.extend_from_slice(&tag);

    Ok(CipherBundle::from_bytes(URL_SAFE.encode(&data)))
}
