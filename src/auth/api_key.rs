//! API Key generation and verification

use rand::Rng;
use sha2::{Digest, Sha256};

/// API Key prefix for identification
const API_KEY_PREFIX: &str = "hbk_";

/// Generate a new plaintext API key token.
///
/// The token is handed to the admin exactly once; only its hash goes into
/// the database.
pub fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    format!("{}{}", API_KEY_PREFIX, hex::encode(random_bytes))
}

/// Hash an API key for storage (SHA-256, hex encoded)
pub fn hash_api_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Verify an API key against a stored hash
pub fn verify_api_key(key: &str, stored_hash: &str) -> bool {
    hash_api_key(key) == stored_hash
}

/// Check if a string looks like an API key
pub fn is_api_key_format(s: &str) -> bool {
    s.starts_with(API_KEY_PREFIX) && s.len() == API_KEY_PREFIX.len() + 64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_verify_against_their_hash() {
        let key = generate_api_key();

        assert!(key.starts_with(API_KEY_PREFIX));
        assert!(is_api_key_format(&key));
        assert!(verify_api_key(&key, &hash_api_key(&key)));
        assert!(!verify_api_key("wrong-key", &hash_api_key(&key)));
    }

    #[test]
    fn hash_is_plain_sha256_hex() {
        // echo -n "hbk_test" | sha256sum
        assert_eq!(
            hash_api_key("hbk_test"),
            "6cf2a408f9779737e2cc1e72afda0449cad40d25b6489b55683d257ad4c799a1"
        );
    }

    #[test]
    fn generated_keys_are_unique() {
        assert_ne!(generate_api_key(), generate_api_key());
    }
}
