//! Driving port for identity lookups and the admin user listing.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{User, UserId};

/// Domain use-case port for reading user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Resolve a session subject into a full user record.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Error>;

    /// Return every registered user for the admin dashboard.
    async fn list_all(&self) -> Result<Vec<User>, Error>;
}
