//! Driving port for registration and login use-cases.
//!
//! Inbound adapters call this port to establish who a request belongs to
//! without importing the backing infrastructure. HTTP handler tests
//! substitute a mock instead of wiring persistence and hashing.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::{NewUser, User};

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a citizen account with both role flags false.
    ///
    /// A taken username fails with a conflict error.
    async fn register(&self, new_user: &NewUser) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
