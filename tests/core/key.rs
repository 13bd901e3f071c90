// tests/core/key.rs
use dictocrypt::core::{generate_key, SymmetricKey};
use dictocrypt::error::CoreError;

#[test]
fn test_generate_key_is_random_and_44_chars() {
    let key1 = generate_key().encode();
    let key2 = generate_key().encode();
    assert_eq!(key1.len(), 44);
    assert!(key1.ends_with('='));
    assert_ne!(key1, key2);
}

#[test]
fn test_encoding_is_padded_url_safe_base64() {
    let key = SymmetricKey::from_bytes([0x42; 32]);
    assert_eq!(key.encode(), "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI=");

    let key = SymmetricKey::from_bytes([0xfb; 32]);
    let encoded = key.encode();
    assert!(!encoded.contains('+') && !encoded.contains('/'));
    assert!(encoded.contains('-') || encoded.contains('_'));
}

#[test]
fn test_decode_reverses_encode() {
    let key = generate_key();
    let decoded = SymmetricKey::decode(key.encode().as_bytes()).unwrap();
    assert_eq!(decoded.encode(), key.encode());
}

#[test]
fn test_decode_ignores_surrounding_whitespace() {
    let text = "  QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI=\n";
    let key = SymmetricKey::decode(text.as_bytes()).unwrap();
    assert_eq!(key.encode(), text.trim());
}

#[test]
fn test_decode_rejects_bad_keys() {
    for bad in [
        "",
        "QkJC",
        "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI",
        "+/JCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI=",
        "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQk==",
    ] {
        let err = SymmetricKey::decode(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidKey(_)), "accepted {bad:?}");
    }
}

#[test]
fn test_debug_does_not_leak_key() {
    let key = SymmetricKey::from_bytes([0x42; 32]);
    let debug = format!("{key:?}");
    assert!(!debug.contains("QkJC"));
    assert!(debug.contains("REDACTED"));
}
