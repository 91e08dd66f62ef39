//! Argon2id password hashing.
//!
//! Digests are PHC strings with the random salt embedded, so hashing the
//! same password twice yields different strings that both verify.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use tracing::instrument;

use crate::error::AppError;

#[instrument(name = "password::hash", skip_all, err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Returns `Ok(false)` on a mismatch. A stored digest that does not parse
/// is an internal error, not a failed login.
#[instrument(name = "password::verify", skip_all, err(Display))]
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hashed_password)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
