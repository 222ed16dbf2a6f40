//! Domain ports and supporting types for the hexagonal boundary.

mod account_service;
mod complaint_repository;
mod complaint_triage;
mod credential_hasher;
mod department_repository;
mod departments_query;
mod user_repository;
mod user_role_command;
mod users_query;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
pub use complaint_repository::{ComplaintPersistenceError, ComplaintRepository, TriageUpdate};
#[cfg(test)]
pub use complaint_triage::MockComplaintTriage;
pub use complaint_triage::ComplaintTriage;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
pub use department_repository::{DepartmentPersistenceError, DepartmentRepository};
#[cfg(test)]
pub use departments_query::MockDepartmentsQuery;
pub use departments_query::DepartmentsQuery;
pub use user_repository::{StoredCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_role_command::MockUserRoleCommand;
pub use user_role_command::UserRoleCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
