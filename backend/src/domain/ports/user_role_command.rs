//! Driving port for administrator role management.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{RoleAssignment, User, UserId};

/// Domain use-case port for changing a user's role capabilities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRoleCommand: Send + Sync {
    /// Apply a validated role change and return the updated record.
    ///
    /// Fails with a not-found error when the identifier matches no user.
    async fn assign_role(&self, id: UserId, assignment: RoleAssignment) -> Result<User, Error>;
}
