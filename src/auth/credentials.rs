//! Password hashing and verification.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use tracing::{debug, error, instrument};

use crate::shared::AppError;

/// Hashes `password` with Argon2 and a fresh random salt.
/// Returns the PHC string form, which embeds the salt and parameters.
#[instrument(skip(password))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "Argon2 password hashing failed");
            AppError::CredentialError(e.to_string())
        })
}

/// Checks `password` against a stored hash.
///
/// A mismatch is `Ok(false)`. Only a hash that cannot be parsed, or an
/// internal Argon2 failure, is an error.
#[instrument(skip(password, hash))]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "Stored password hash is malformed");
        AppError::CredentialError(e.to_string())
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => {
            debug!("Password does not match stored hash");
            Ok(false)
        }
        Err(e) => {
            error!(error = %e, "Argon2 password verification failed");
            Err(AppError::CredentialError(e.to_string()))
        }
    }
}

/// Runs [`hash_password`] on the blocking thread pool.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::CredentialError(e.to_string()))?
}

/// Runs [`verify_password`] on the blocking thread pool.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::CredentialError(e.to_string()))?
}
