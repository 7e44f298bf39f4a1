use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use common::error::{AppError, Res};

/// Hashes a plaintext password with a freshly generated salt.
///
/// Pure transform: callers on a user-facing set-password path are expected
/// to have run the strength policy first. The output is a PHC-format
/// string carrying the salt and cost parameters.
pub fn hash_password(plaintext: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a plaintext against a stored hash.
///
/// A hash that does not parse is treated as a mismatch, not an error: a
/// corrupt row must not turn a login attempt into a crash.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed_hash)
        .is_ok()
}
