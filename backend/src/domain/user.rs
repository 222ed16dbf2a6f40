//! User identity, role capabilities, and registration validation.
//!
//! Role flags are independent boolean capabilities, never a hierarchy:
//! `is_admin` and `is_department_head` may both be set and each endpoint
//! composes exactly the checks it needs.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::department::DepartmentId;

/// Stable user identifier assigned by the relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a store-assigned identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Independent role capabilities attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Roles {
    /// Unrestricted triage and role-management capability.
    pub is_admin: bool,
    /// May triage complaints assigned to the owning department.
    pub is_department_head: bool,
    /// Owning department when acting as a department head.
    pub department_id: Option<DepartmentId>,
}

/// Application user resolved from the identity store.
///
/// ## Invariants
/// - `username` is unique in the store.
/// - Credential hashes are held by the persistence layer only and never
///   appear on this type or in serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = i32, example = 7)]
    id: UserId,
    #[schema(example = "mgarcia")]
    username: String,
    #[schema(example = "María García")]
    full_name: String,
    #[schema(example = "maria@example.org")]
    email: String,
    is_admin: bool,
    is_department_head: bool,
    #[schema(value_type = Option<i32>)]
    department_id: Option<DepartmentId>,
}

impl User {
    /// Build a user from store-validated components.
    pub const fn new(
        id: UserId,
        username: String,
        full_name: String,
        email: String,
        roles: Roles,
    ) -> Self {
        Self {
            id,
            username,
            full_name,
            email,
            is_admin: roles.is_admin,
            is_department_head: roles.is_department_head,
            department_id: roles.department_id,
        }
    }

    /// Stable user identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Unique login handle.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Display name shown on dashboards.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Contact address supplied at registration.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Whether the user carries the administrator capability.
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Whether the user carries the department-head capability.
    pub const fn is_department_head(&self) -> bool {
        self.is_department_head
    }

    /// Owning department, when assigned.
    pub const fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    /// Role capabilities as one value.
    pub const fn roles(&self) -> Roles {
        Roles {
            is_admin: self.is_admin,
            is_department_head: self.is_department_head,
            department_id: self.department_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: i32,
    username: String,
    full_name: String,
    email: String,
    is_admin: bool,
    is_department_head: bool,
    department_id: Option<i32>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.get(),
            username: value.username,
            full_name: value.full_name,
            email: value.email,
            is_admin: value.is_admin,
            is_department_head: value.is_department_head,
            department_id: value.department_id.map(DepartmentId::get),
        }
    }
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self {
            id: UserId::new(value.id),
            username: value.username,
            full_name: value.full_name,
            email: value.email,
            is_admin: value.is_admin,
            is_department_head: value.is_department_head,
            department_id: value.department_id.map(DepartmentId::new),
        }
    }
}

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 6;
/// Minimum full-name length accepted at registration.
pub const FULL_NAME_MIN: usize = 3;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One non-whitespace local part, an @, and a dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Per-field failures raised while validating a registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password fell short of [`PASSWORD_MIN`].
    PasswordTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Full name fell short of [`FULL_NAME_MIN`].
    FullNameTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Email does not look like an address.
    InvalidEmail,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::FullNameTooShort { min } => {
                write!(f, "full name must be at least {min} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated registration payload.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is at least [`PASSWORD_MIN`] characters and zeroized on drop.
/// - `full_name` is at least [`FULL_NAME_MIN`] characters once trimmed.
/// - `email` matches the address shape check.
#[derive(Debug, Clone)]
pub struct NewUser {
    username: String,
    password: Zeroizing<String>,
    full_name: String,
    email: String,
}

impl NewUser {
    /// Validate raw registration inputs, collecting every failing field.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        full_name: &str,
        email: &str,
    ) -> Result<Self, Vec<RegistrationValidationError>> {
        let mut errors = Vec::new();

        let username = username.trim();
        if username.is_empty() {
            errors.push(RegistrationValidationError::EmptyUsername);
        }
        if password.chars().count() < PASSWORD_MIN {
            errors.push(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        let full_name = full_name.trim();
        if full_name.chars().count() < FULL_NAME_MIN {
            errors.push(RegistrationValidationError::FullNameTooShort { min: FULL_NAME_MIN });
        }
        let email = email.trim();
        if !email_regex().is_match(email) {
            errors.push(RegistrationValidationError::InvalidEmail);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            full_name: full_name.to_owned(),
            email: email.to_owned(),
        })
    }

    /// Unique login handle.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plaintext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Display name shown on dashboards.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Validated role change applied by an administrator.
///
/// ## Invariants
/// - A department head always names an owning department; an admin flag is
///   untouched by this operation and does not require one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Whether the user becomes a department head.
    pub is_department_head: bool,
    /// Owning department for a department head, cleared otherwise.
    pub department_id: Option<DepartmentId>,
}

/// Failure raised when a role change breaks the head/department invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleAssignmentError {
    /// A department head must name an owning department.
    #[error("a department head must be assigned to a department")]
    HeadWithoutDepartment,
}

impl RoleAssignment {
    /// Validate a role change against the head/department invariant.
    pub const fn try_new(
        is_department_head: bool,
        department_id: Option<DepartmentId>,
    ) -> Result<Self, RoleAssignmentError> {
        if is_department_head && department_id.is_none() {
            return Err(RoleAssignmentError::HeadWithoutDepartment);
        }
        Ok(Self {
            is_department_head,
            department_id,
        })
    }
}
