// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret containers used throughout dictocrypt.

pub use secure_gate::{dynamic_alias, fixed_alias, random_alias};

// Fixed-size secrets
fixed_alias!(FernetKey32, 32); // 128-bit signing key || 128-bit AES key

// Dynamic secrets
dynamic_alias!(PlainText, Vec<u8>); // decrypted bytes before deserialization
dynamic_alias!(RawKeyBytes, Vec<u8>); // base64-decoded key file contents

// Random secrets
random_alias!(RandomKey32, 32);
