//! Argon2id credential hashing adapter.
//!
//! Hashes are stored as self-describing PHC strings, so parameters can be
//! tuned later without invalidating existing credentials.

use argon2::Argon2;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use rand::rngs::OsRng;

use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Argon2id implementation of the credential-hashing port.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| CredentialHashError::new(error.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|error| CredentialHashError::new(format!("malformed stored hash: {error}")))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(error) => Err(CredentialHashError::new(error.to_string())),
        }
    }
}
