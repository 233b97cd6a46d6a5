//! One-way password hashing (argon2id, PHC string format).
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
};
use rand_core::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to hash password: {0}")]
pub struct PasswordHashError(String);

/// Adaptive one-way hash with a constant-time verify.
///
/// Both operations are CPU-bound and synchronous.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError>;

    /// `false` for a mismatch and also for a hash that cannot be parsed.
    fn verify(&self, hash: &str, plain: &str) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| PasswordHashError(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, hash: &str, plain: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        // argon2 compares digests in constant time
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_contains_plaintext() {
        let password = "correct-horse-battery";
        let hash = Argon2Hasher.hash(password).unwrap();

        assert_ne!(hash, password);
        assert!(!hash.contains(password));
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hash1 = Argon2Hasher.hash("same-password").unwrap();
        let hash2 = Argon2Hasher.hash("same-password").unwrap();
        assert_ne!(hash1, hash2);
        assert!(Argon2Hasher.verify(&hash1, "same-password"));
        assert!(Argon2Hasher.verify(&hash2, "same-password"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = Argon2Hasher.hash("correct-password").unwrap();
        assert!(!Argon2Hasher.verify(&hash, "wrong-password"));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!Argon2Hasher.verify("not-a-phc-string", "whatever1"));
    }
}
