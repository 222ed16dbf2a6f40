//! Driven port for identity-store persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{NewUser, RoleAssignment, User, UserId};

/// Persistence errors raised by identity-store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
    /// The unique-username constraint rejected an insert.
    #[error("username {username:?} is already taken")]
    DuplicateUsername {
        /// Handle that collided.
        username: String,
    },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-username error for the given handle.
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }
}

/// A user record paired with its stored credential hash.
///
/// Only the account service ever sees this pairing; the hash goes no further.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    /// The sanitized user record.
    pub user: User,
    /// Argon2id PHC string stored at registration.
    pub password_hash: String,
}

/// Identity-store persistence port.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a registration with both role flags false.
    async fn insert(
        &self,
        new_user: &NewUser,
        password_hash: &str,
    ) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and credential hash by unique username.
    async fn find_for_login(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// List every registered user in identifier order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Apply a role change, returning the updated record or `None` when the
    /// identifier matches no user.
    async fn set_role(
        &self,
        id: UserId,
        assignment: RoleAssignment,
    ) -> Result<Option<User>, UserPersistenceError>;
}
