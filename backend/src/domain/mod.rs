//! Domain primitives, services, and ports.
//!
//! Purpose: strongly typed entities for users, departments, and complaints,
//! the authorization gate, and the ticket lifecycle controller. Inbound and
//! outbound adapters depend on this module; it depends on nothing but the
//! trace middleware for error correlation.

pub mod account;
pub mod auth;
pub mod authz;
pub mod complaint;
pub mod department;
pub mod directory;
pub mod error;
pub mod ports;
pub mod registry;
pub mod triage;
pub mod user;

pub use self::account::AccountServiceImpl;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::complaint::{
    Complaint, ComplaintId, ComplaintKind, ComplaintStatus, ComplaintValidationError,
    DESCRIPTION_MIN, DeskStatus, NewComplaint,
};
pub use self::department::{DEFAULT_DEPARTMENTS, Department, DepartmentId, NewDepartment};
pub use self::directory::UserDirectory;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::registry::{DepartmentRegistry, SeedOutcome};
pub use self::triage::TriageService;
pub use self::user::{
    FULL_NAME_MIN, NewUser, PASSWORD_MIN, RegistrationValidationError, RoleAssignment,
    RoleAssignmentError, Roles, User, UserId,
};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
