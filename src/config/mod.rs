// src/config/mod.rs
//! Configuration system for dictocrypt
//!
//! Central, lazy-loaded global config from TOML with built-in defaults.

pub use app::{config_path, load, load_from, parse, Config, DecryptSettings, StorageSettings};

mod app;
mod defaults;
