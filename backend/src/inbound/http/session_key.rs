//! Session key fingerprinting for operational visibility.
//!
//! Provides a truncated SHA-256 fingerprint of the session signing key so
//! operators can verify which key is active without exposing key material.
//! The fingerprint is logged once at startup.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Generate a truncated SHA-256 fingerprint of the key's signing material.
///
/// Returns the first 8 bytes of the hash as a 16-character hex string,
/// enough for visual distinction in logs without being security-sensitive.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.signing());
    let digest = hasher.finalize();
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
