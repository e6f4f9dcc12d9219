use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// Hashes are PHC strings handed around as opaque bytes.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with Argon2id default parameters
    pub fn new() -> Self {
        Self
    }

    /// Hash a secret with a fresh random salt.
    ///
    /// Two calls with the same secret produce different outputs.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to hash
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and hash) as bytes
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or hashing failed
    pub fn hash(&self, secret: &[u8]) -> Result<Vec<u8>, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(secret, &salt)
            .map(|hash| hash.to_string().into_bytes())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a candidate secret against a stored hash.
    ///
    /// The digest comparison is constant time. A stored hash that is not a
    /// valid PHC string never matches.
    ///
    /// # Arguments
    /// * `hash` - Stored hash as produced by [`PasswordHasher::hash`]
    /// * `candidate` - Plaintext secret to check
    ///
    /// # Returns
    /// True if the candidate reproduces the hash
    pub fn verify(&self, hash: &[u8], candidate: &[u8]) -> bool {
        let Ok(encoded) = std::str::from_utf8(hash) else {
            return false;
        };
        let Ok(parsed_hash) = PasswordHash::new(encoded) else {
            return false;
        };

        Argon2::default()
            .verify_password(candidate, &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = b"my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(&hash, password));
        assert!(!hasher.verify(&hash, b"wrong_password"));
    }

    #[test]
    fn test_hash_uses_argon2id() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash(b"secret123").expect("Failed to hash password");

        assert!(hash.starts_with(b"$argon2id$"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash(b"secret123").expect("Failed to hash password");
        let second = hasher.hash(b"secret123").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify(&first, b"secret123"));
        assert!(hasher.verify(&second, b"secret123"));
    }

    #[test]
    fn test_hash_never_contains_secret() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash(b"plaintext-marker").expect("Failed to hash password");

        assert!(!hash
            .windows(b"plaintext-marker".len())
            .any(|w| w == b"plaintext-marker"));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify(b"invalid_hash", b"password"));
        assert!(!hasher.verify(&[0xff, 0xfe, 0x00], b"password"));
        assert!(!hasher.verify(b"", b""));
    }
}
