// Password hashing and verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Uses Argon2id with the crate's default parameters. The output is a
/// PHC-format string carrying algorithm, cost parameters, salt, and digest,
/// so verification needs no out-of-band metadata.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a freshly generated random salt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored PHC-format hash
    ///
    /// Returns `false` both for a wrong password and for a malformed stored
    /// hash, so callers cannot distinguish the two cases. The digest
    /// comparison inside the argon2 crate is constant-time.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = PasswordService::hash_password("correcthorsebatterystaple").unwrap();
        assert!(PasswordService::verify_password(
            "correcthorsebatterystaple",
            &hash
        ));
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hash = PasswordService::hash_password("right-password").unwrap();
        assert!(!PasswordService::verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = PasswordService::hash_password("same-password").unwrap();
        let second = PasswordService::hash_password("same-password").unwrap();

        // Different salts produce different stored strings
        assert_ne!(first, second);

        // Both still verify against the original password
        assert!(PasswordService::verify_password("same-password", &first));
        assert!(PasswordService::verify_password("same-password", &second));
    }

    #[test]
    fn test_hash_is_phc_format() {
        let hash = PasswordService::hash_password("anything").unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_malformed_hash_returns_false() {
        assert!(!PasswordService::verify_password("password", ""));
        assert!(!PasswordService::verify_password("password", "not-a-hash"));
        assert!(!PasswordService::verify_password(
            "password",
            "$argon2id$v=19$truncated"
        ));
    }

    #[test]
    fn test_empty_password_is_hashable() {
        let hash = PasswordService::hash_password("").unwrap();
        assert!(PasswordService::verify_password("", &hash));
        assert!(!PasswordService::verify_password("nonempty", &hash));
    }

    proptest! {
        // Hashing is slow by design, keep the case count low
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_verify_accepts_original_password(password in ".{0,64}") {
            let hash = PasswordService::hash_password(&password).unwrap();
            prop_assert!(PasswordService::verify_password(&password, &hash));
        }

        #[test]
        fn prop_verify_rejects_different_password(
            p1 in "[a-z]{8,16}",
            p2 in "[A-Z]{8,16}"
        ) {
            let hash = PasswordService::hash_password(&p2).unwrap();
            prop_assert!(!PasswordService::verify_password(&p1, &hash));
        }
    }
}
