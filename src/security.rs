use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hash a password with a single unsalted SHA-256 round.
///
/// This mirrors the placeholder auth scheme the service has always used.
/// It is NOT a credible password store (no salt, no stretching) and the
/// issued tokens are never validated by any endpoint.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Constant-shape comparison of a password against a stored digest
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

/// Generate an opaque session token (32 random bytes, hex-encoded)
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_deterministic() {
        assert_eq!(hash_password("secret123"), hash_password("secret123"));
        assert_ne!(hash_password("secret123"), hash_password("secret124"));
    }

    #[test]
    fn test_hash_password_is_hex_sha256() {
        let hash = hash_password("password");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_generate_token_is_opaque_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
