//! Port abstracting the password-hashing scheme away from the domain.

/// Failure raised by the hashing backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("credential hashing failed: {message}")]
pub struct CredentialHashError {
    /// Underlying failure description.
    pub message: String,
}

impl CredentialHashError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Hashing and verification of login passwords.
///
/// Implementations produce self-describing PHC strings so the scheme and its
/// parameters can evolve without a data migration.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into a PHC string.
    fn hash(&self, password: &str) -> Result<String, CredentialHashError>;

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// Returns `Ok(false)` for a well-formed hash that does not match;
    /// errors are reserved for malformed hashes or backend failures.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, CredentialHashError>;
}
