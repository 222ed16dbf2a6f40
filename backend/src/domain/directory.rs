//! User directory: identity lookups, the admin listing, and role changes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::map_user_persistence_error;
use crate::domain::error::Error;
use crate::domain::ports::{UserRepository, UserRoleCommand, UsersQuery};
use crate::domain::user::{RoleAssignment, User, UserId};

/// Directory service backed by the identity store.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
}

impl UserDirectory {
    /// Create a directory over the given identity store.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UsersQuery for UserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn list_all(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_persistence_error)
    }
}

#[async_trait]
impl UserRoleCommand for UserDirectory {
    async fn assign_role(&self, id: UserId, assignment: RoleAssignment) -> Result<User, Error> {
        self.users
            .set_role(id, assignment)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for lookup and role-change mapping.
    use std::sync::Mutex;

    use super::*;
    use crate::domain::department::DepartmentId;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{StoredCredentials, UserPersistenceError};
    use crate::domain::user::{NewUser, Roles};

    #[derive(Default)]
    struct StubUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl StubUserRepository {
        fn with_users(users: Vec<User>) -> Self {
            Self {
                users: Mutex::new(users),
            }
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn insert(
            &self,
            _new_user: &NewUser,
            _password_hash: &str,
        ) -> Result<User, UserPersistenceError> {
            Err(UserPersistenceError::query("not exercised"))
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
            let users = self.users.lock().expect("users lock");
            Ok(users.iter().find(|user| user.id() == id).cloned())
        }

        async fn find_for_login(
            &self,
            _username: &str,
        ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
            Ok(self.users.lock().expect("users lock").clone())
        }

        async fn set_role(
            &self,
            id: UserId,
            assignment: RoleAssignment,
        ) -> Result<Option<User>, UserPersistenceError> {
            let mut users = self.users.lock().expect("users lock");
            let Some(found) = users.iter_mut().find(|user| user.id() == id) else {
                return Ok(None);
            };
            let updated = User::new(
                found.id(),
                found.username().to_owned(),
                found.full_name().to_owned(),
                found.email().to_owned(),
                Roles {
                    is_admin: found.is_admin(),
                    is_department_head: assignment.is_department_head,
                    department_id: assignment.department_id,
                },
            );
            *found = updated.clone();
            Ok(Some(updated))
        }
    }

    fn citizen(id: i32) -> User {
        User::new(
            UserId::new(id),
            format!("user{id}"),
            "Test Person".to_owned(),
            "person@example.org".to_owned(),
            Roles::default(),
        )
    }

    #[tokio::test]
    async fn promotion_returns_the_updated_record() {
        let directory = UserDirectory::new(Arc::new(StubUserRepository::with_users(vec![
            citizen(7),
        ])));
        let assignment = RoleAssignment::try_new(true, Some(DepartmentId::new(3)))
            .expect("valid assignment");

        let updated = directory
            .assign_role(UserId::new(7), assignment)
            .await
            .expect("promotion succeeds");

        assert!(updated.is_department_head());
        assert_eq!(updated.department_id(), Some(DepartmentId::new(3)));
    }

    #[tokio::test]
    async fn promotion_of_missing_user_is_not_found() {
        let directory = UserDirectory::new(Arc::new(StubUserRepository::default()));
        let assignment = RoleAssignment::try_new(false, None).expect("valid assignment");

        let err = directory
            .assign_role(UserId::new(9), assignment)
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn listing_returns_every_user() {
        let directory = UserDirectory::new(Arc::new(StubUserRepository::with_users(vec![
            citizen(1),
            citizen(2),
        ])));
        assert_eq!(directory.list_all().await.expect("listing").len(), 2);
    }
}
