//! Password value object - Domain layer password handling.
//!
//! Hashes with Argon2id (PHC string format, random per-password salt).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use crate::errors::{AppError, AppResult};

/// Hash checked when the username is unknown, so a failed login costs the
/// same whether or not the account exists.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| Password::hash("dummy-password-for-timing").ok());

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the password is empty.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.is_empty() {
            return Err(AppError::invalid_input(
                "Both username and password are required.",
            ));
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    /// Burn one verification against a throwaway hash. Always `false`.
    pub fn verify_dummy(plain_text: &str) -> bool {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = Self::verify_hash(plain_text, hash);
        }
        false
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    /// Argon2id, version 0x13, default cost parameters.
    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("pw1").unwrap();

        assert!(password.verify("pw1"));
        assert!(!password.verify("pw2"));
    }

    #[test]
    fn test_password_uses_argon2id() {
        let password = Password::new("pw1").unwrap();
        assert!(password.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_password_from_hash() {
        let password = Password::new("TestPassword123").unwrap();
        let restored = Password::from_hash(password.as_str().to_string());
        assert!(restored.verify("TestPassword123"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("same").unwrap();
        let pass2 = Password::new("same").unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify("same"));
        assert!(pass2.verify("same"));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(Password::new(""), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let restored = Password::from_hash("sha256$abc$def".to_string());
        assert!(!restored.verify("anything"));
    }

    #[test]
    fn test_verify_dummy_is_always_false() {
        assert!(!Password::verify_dummy("dummy-password-for-timing"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("pw1").unwrap();
        let debug = format!("{:?}", password);
        assert!(!debug.contains("argon2"));
    }
}
