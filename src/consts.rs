// src/consts.rs
//! Shared constants — token layout and naming defaults

/// Fernet token version byte
pub const TOKEN_VERSION: u8 = 0x80;

/// Raw key length: signing half + encryption half
pub const KEY_LEN: usize = 32;

/// Length of each key half
pub const KEY_HALF_LEN: usize = 16;

/// Encoded key length (URL-safe base64, padded)
pub const ENCODED_KEY_LEN: usize = 44;

/// Big-endian seconds since the Unix epoch
pub const TIMESTAMP_LEN: usize = 8;

/// AES-128-CBC IV length
pub const IV_LEN: usize = 16;

/// AES block size; ciphertext is always a positive multiple of this
pub const BLOCK_LEN: usize = 16;

/// HMAC-SHA256 tag length
pub const HMAC_LEN: usize = 32;

/// version || timestamp || iv
pub const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;

/// Smallest well-formed token: header, one cipher block, tag
pub const MIN_TOKEN_LEN: usize = HEADER_LEN + BLOCK_LEN + HMAC_LEN;

/// Tokens stamped further than this into the future fail a TTL check
pub const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Default description used to name the secret files
pub const DEFAULT_DESCRIPTION: &str = "secretfile";

/// Appended to the description for the key file
pub const DEFAULT_KEY_SUFFIX: &str = "-key";

/// Extension for both the key and the bundle file
pub const DEFAULT_EXTENSION: &str = "txt";

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "DICTOCRYPT_CONFIG";

/// Config file name looked up under the platform config dir
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Owner read/write only
#[cfg(unix)]
pub const KEY_FILE_MODE: u32 = 0o600;
