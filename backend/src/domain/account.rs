//! Account service: registration and credential verification.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::ports::{
    AccountService, CredentialHashError, CredentialHasher, UserPersistenceError, UserRepository,
};
use crate::domain::user::{NewUser, User};

/// Account service backed by the identity store and a credential hasher.
#[derive(Clone)]
pub struct AccountServiceImpl {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountServiceImpl {
    /// Create a service over the given identity store and hasher.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict("username is already taken")
        }
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn register(&self, new_user: &NewUser) -> Result<User, Error> {
        let existing = self
            .users
            .find_for_login(new_user.username())
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict("username is already taken"));
        }

        let password_hash = self
            .hasher
            .hash(new_user.password())
            .map_err(map_hash_error)?;

        // The unique constraint still backstops a concurrent registration
        // racing past the lookup above.
        self.users
            .insert(new_user, &password_hash)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self
            .users
            .find_for_login(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            // Same failure as a wrong password: usernames are not probeable.
            return Err(Error::unauthorized("invalid credentials"));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized("invalid credentials"));
        }

        Ok(stored.user)
    }
}
