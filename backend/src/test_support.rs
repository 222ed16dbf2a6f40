//! In-memory port implementations for integration tests.
//!
//! These adapters mirror the relational semantics the Diesel repositories
//! rely on: store-assigned sequential identifiers, a unique-username
//! constraint, and last-write-wins triage updates. Integration suites wire
//! them into the real services so whole request flows run without I/O.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    ComplaintPersistenceError, ComplaintRepository, CredentialHashError, CredentialHasher,
    DepartmentPersistenceError, DepartmentRepository, StoredCredentials, TriageUpdate,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Complaint, ComplaintId, ComplaintStatus, Department, DepartmentId, NewComplaint, NewDepartment,
    NewUser, RoleAssignment, Roles, User, UserId,
};

/// Reversible stand-in hasher; integration tests assert on flows, not on
/// hashing strength.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextCredentialHasher;

impl CredentialHasher for PlainTextCredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, CredentialHashError> {
        Ok(stored_hash == format!("plain:{password}"))
    }
}

/// In-memory identity store with a unique-username constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: Mutex<Vec<StoredCredentials>>,
    next_id: AtomicI32,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> UserId {
        UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Insert a user with explicit role flags, as an admin-prepared fixture.
    pub fn seed_user(&self, username: &str, password: &str, roles: Roles) -> User {
        let id = self.allocate_id();
        let user = User::new(
            id,
            username.to_owned(),
            format!("Seeded {username}"),
            format!("{username}@example.org"),
            roles,
        );
        self.records
            .lock()
            .expect("records lock")
            .push(StoredCredentials {
                user: user.clone(),
                password_hash: format!("plain:{password}"),
            });
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        new_user: &NewUser,
        password_hash: &str,
    ) -> Result<User, UserPersistenceError> {
        let mut records = self.records.lock().expect("records lock");
        if records
            .iter()
            .any(|record| record.user.username() == new_user.username())
        {
            return Err(UserPersistenceError::duplicate_username(new_user.username()));
        }
        let user = User::new(
            self.allocate_id(),
            new_user.username().to_owned(),
            new_user.full_name().to_owned(),
            new_user.email().to_owned(),
            Roles::default(),
        );
        records.push(StoredCredentials {
            user: user.clone(),
            password_hash: password_hash.to_owned(),
        });
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let records = self.records.lock().expect("records lock");
        Ok(records
            .iter()
            .find(|record| record.user.id() == id)
            .map(|record| record.user.clone()))
    }

    async fn find_for_login(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let records = self.records.lock().expect("records lock");
        Ok(records
            .iter()
            .find(|record| record.user.username() == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let records = self.records.lock().expect("records lock");
        Ok(records.iter().map(|record| record.user.clone()).collect())
    }

    async fn set_role(
        &self,
        id: UserId,
        assignment: RoleAssignment,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut records = self.records.lock().expect("records lock");
        let Some(record) = records.iter_mut().find(|record| record.user.id() == id) else {
            return Ok(None);
        };
        let updated = User::new(
            record.user.id(),
            record.user.username().to_owned(),
            record.user.full_name().to_owned(),
            record.user.email().to_owned(),
            Roles {
                is_admin: record.user.is_admin(),
                is_department_head: assignment.is_department_head,
                department_id: assignment.department_id,
            },
        );
        record.user = updated.clone();
        Ok(Some(updated))
    }
}

/// In-memory complaint ledger with sequential identifiers.
#[derive(Default)]
pub struct InMemoryComplaintRepository {
    complaints: Mutex<Vec<Complaint>>,
    next_id: AtomicI32,
}

impl InMemoryComplaintRepository {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(
        &self,
        owner: UserId,
        complaint: &NewComplaint,
    ) -> Result<Complaint, ComplaintPersistenceError> {
        let id = ComplaintId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let created = Complaint::new(
            id,
            owner,
            complaint.kind(),
            complaint.description().to_owned(),
            ComplaintStatus::Pending,
            None,
            Utc::now(),
        );
        self.complaints
            .lock()
            .expect("ledger lock")
            .push(created.clone());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        id: ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError> {
        let complaints = self.complaints.lock().expect("ledger lock");
        Ok(complaints.iter().find(|c| c.id() == id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let complaints = self.complaints.lock().expect("ledger lock");
        Ok(complaints
            .iter()
            .filter(|c| c.user_id() == owner)
            .cloned()
            .collect())
    }

    async fn list_by_department(
        &self,
        department: DepartmentId,
    ) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let complaints = self.complaints.lock().expect("ledger lock");
        Ok(complaints
            .iter()
            .filter(|c| c.department_id() == Some(department))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        Ok(self.complaints.lock().expect("ledger lock").clone())
    }

    async fn apply(
        &self,
        id: ComplaintId,
        update: TriageUpdate,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError> {
        let mut complaints = self.complaints.lock().expect("ledger lock");
        let Some(found) = complaints.iter_mut().find(|c| c.id() == id) else {
            return Ok(None);
        };
        let updated = Complaint::new(
            found.id(),
            found.user_id(),
            found.kind(),
            found.description().to_owned(),
            update.status.unwrap_or(found.status()),
            update.department.or(found.department_id()),
            found.created_at(),
        );
        *found = updated.clone();
        Ok(Some(updated))
    }
}

/// In-memory department registry with sequential identifiers.
#[derive(Default)]
pub struct InMemoryDepartmentRepository {
    departments: Mutex<Vec<Department>>,
    next_id: AtomicI32,
}

impl InMemoryDepartmentRepository {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn list(&self) -> Result<Vec<Department>, DepartmentPersistenceError> {
        Ok(self.departments.lock().expect("registry lock").clone())
    }

    async fn insert(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, DepartmentPersistenceError> {
        let id = DepartmentId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let created = Department::new(id, department.name.clone(), department.description.clone());
        self.departments
            .lock()
            .expect("registry lock")
            .push(created.clone());
        Ok(created)
    }
}
