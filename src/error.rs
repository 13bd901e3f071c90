// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("no such directory: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("payload encoding failed: {0}")]
    Encoding(String),

    #[error("malformed cipher bundle: {0}")]
    MalformedBundle(&'static str),

    #[error("invalid key: {0}")]
    InvalidKey(&'static str),

    #[error("bundle authentication failed")]
    Authentication,

    #[error("bundle expired: issued at {issued_at}, ttl {ttl_secs}s")]
    Expired { issued_at: i64, ttl_secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Encoding(err.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}
