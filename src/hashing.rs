//! Phone number hashing.
//!
//! Callers hash numbers locally before they ever reach the server; the
//! store is keyed by the resulting digest only. The same derivation is used
//! by the fixture loader so provisioned records line up with client hashes.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Strip everything but ASCII digits (`+20 123-456` → `20123456`).
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Hash a phone number for lookup.
///
/// Uses SHA-256(digits-only phone), lowercase hex.
pub fn hash_phone(phone: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_phone(phone).as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether `value` has the shape of a lowercase hex SHA-256 digest, the
/// only form [`hash_phone`] produces.
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == HASH_HEX_LEN && value.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize_phone("+20 123-456-7890"), "201234567890");
        assert_eq!(normalize_phone("(555) 010 9999"), "5550109999");
        assert_eq!(normalize_phone("no digits"), "");
    }

    #[test]
    fn test_hash_ignores_formatting() {
        assert_eq!(hash_phone("+201234567890"), hash_phone("201234567890"));
        assert_eq!(hash_phone("+20 123 456 7890"), hash_phone("201234567890"));
    }

    #[test]
    fn test_hash_known_digest() {
        // sha256("") is a well-known constant
        assert_eq!(
            hash_phone(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_shape() {
        let digest = hash_phone("201112223333");
        assert_eq!(digest.len(), HASH_HEX_LEN);
        assert!(is_sha256_hex(&digest));
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn test_is_sha256_hex_rejects() {
        assert!(!is_sha256_hex("deadbeef"));
        assert!(!is_sha256_hex(&"z".repeat(HASH_HEX_LEN)));
        assert!(!is_sha256_hex(""));
    }

    #[test]
    fn test_is_sha256_hex_requires_lowercase() {
        let digest = hash_phone("201234567890");
        assert!(is_sha256_hex(&digest));
        assert!(!is_sha256_hex(&digest.to_uppercase()));
    }
}
