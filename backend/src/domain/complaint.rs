//! Complaint ledger types: ticket kinds, lifecycle states, and validation.
//!
//! Status and kind are closed sum types matched exhaustively at every
//! transition site, so adding a state forces each transition rule to be
//! revisited. The department-desk status payload is its own three-variant
//! enum: returning a ticket to `pending` is unrepresentable there rather than
//! merely rejected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::department::DepartmentId;
use crate::domain::user::UserId;

/// Stable complaint identifier assigned by the relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ComplaintId(i32);

impl ComplaintId {
    /// Wrap a store-assigned identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ComplaintId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Minimum description length accepted at submission.
pub const DESCRIPTION_MIN: usize = 10;

/// Per-field failures raised while validating complaint payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintValidationError {
    /// The submitted kind is not one of the accepted values.
    UnknownKind {
        /// Offending payload value.
        value: String,
    },
    /// The description fell short of [`DESCRIPTION_MIN`].
    DescriptionTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// The submitted status is not one of the accepted values.
    UnknownStatus {
        /// Offending payload value.
        value: String,
    },
    /// Department desks may not return a complaint to `pending`.
    StatusNotDeskAssignable,
    /// Department identifiers are positive store-assigned integers.
    NonPositiveDepartment {
        /// Offending payload value.
        value: i32,
    },
}

impl fmt::Display for ComplaintValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { value } => {
                write!(f, "type must be COMPLAINT, QUERY, or SUGGESTION, got {value:?}")
            }
            Self::DescriptionTooShort { min } => {
                write!(f, "description must be at least {min} characters")
            }
            Self::UnknownStatus { value } => {
                write!(
                    f,
                    "status must be pending, processing, resolved, or rejected, got {value:?}"
                )
            }
            Self::StatusNotDeskAssignable => {
                write!(f, "status must be processing, resolved, or rejected")
            }
            Self::NonPositiveDepartment { value } => {
                write!(f, "departmentId must be a positive integer, got {value}")
            }
        }
    }
}

impl std::error::Error for ComplaintValidationError {}

/// Kind of submission a citizen files. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintKind {
    /// A grievance about a municipal service.
    Complaint,
    /// A request for information.
    Query,
    /// A proposal for improvement.
    Suggestion,
}

impl ComplaintKind {
    /// Parse a payload value into a kind.
    pub fn parse(value: &str) -> Result<Self, ComplaintValidationError> {
        match value {
            "COMPLAINT" => Ok(Self::Complaint),
            "QUERY" => Ok(Self::Query),
            "SUGGESTION" => Ok(Self::Suggestion),
            other => Err(ComplaintValidationError::UnknownKind {
                value: other.to_owned(),
            }),
        }
    }

    /// Wire representation of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complaint => "COMPLAINT",
            Self::Query => "QUERY",
            Self::Suggestion => "SUGGESTION",
        }
    }
}

impl fmt::Display for ComplaintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle stage of a complaint.
///
/// `Pending` is the creation state. None of the states are terminal in
/// storage; an administrator can always mutate further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    /// Submitted, not yet triaged.
    Pending,
    /// Triage has begun.
    Processing,
    /// Closed with a resolution.
    Resolved,
    /// Closed without a resolution.
    Rejected,
}

impl ComplaintStatus {
    /// Parse a payload value into a status.
    pub fn parse(value: &str) -> Result<Self, ComplaintValidationError> {
        match value {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ComplaintValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }

    /// Wire representation of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status a department desk may move a complaint into.
///
/// Deliberately excludes `pending`: desks advance or close tickets, they
/// never send one back to the intake queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeskStatus {
    /// Triage continues.
    Processing,
    /// Closed with a resolution.
    Resolved,
    /// Closed without a resolution.
    Rejected,
}

impl DeskStatus {
    /// Parse a payload value into a desk status.
    ///
    /// `pending` is recognised but refused with a dedicated error so callers
    /// see a precise message rather than a generic enum failure.
    pub fn parse(value: &str) -> Result<Self, ComplaintValidationError> {
        match value {
            "processing" => Ok(Self::Processing),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            "pending" => Err(ComplaintValidationError::StatusNotDeskAssignable),
            other => Err(ComplaintValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }

    /// Widen into the full lifecycle status.
    pub const fn into_status(self) -> ComplaintStatus {
        match self {
            Self::Processing => ComplaintStatus::Processing,
            Self::Resolved => ComplaintStatus::Resolved,
            Self::Rejected => ComplaintStatus::Rejected,
        }
    }
}

/// Citizen-submitted ticket in the complaint ledger.
///
/// ## Invariants
/// - `kind` and `created_at` are immutable after creation.
/// - `description` satisfied [`DESCRIPTION_MIN`] when the record was created.
/// - `department_id` is null until an administrator assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(from = "ComplaintDto", into = "ComplaintDto")]
pub struct Complaint {
    #[schema(value_type = i32, example = 12)]
    id: ComplaintId,
    #[schema(value_type = i32, example = 7)]
    user_id: UserId,
    kind: ComplaintKind,
    #[schema(example = "Necesito ayuda con mi pago")]
    description: String,
    status: ComplaintStatus,
    #[schema(value_type = Option<i32>)]
    department_id: Option<DepartmentId>,
    created_at: DateTime<Utc>,
}

impl Complaint {
    /// Build a complaint from store-validated components.
    pub const fn new(
        id: ComplaintId,
        user_id: UserId,
        kind: ComplaintKind,
        description: String,
        status: ComplaintStatus,
        department_id: Option<DepartmentId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            description,
            status,
            department_id,
            created_at,
        }
    }

    /// Stable complaint identifier.
    pub const fn id(&self) -> ComplaintId {
        self.id
    }

    /// Submitting user.
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Kind of submission; immutable after creation.
    pub const fn kind(&self) -> ComplaintKind {
        self.kind
    }

    /// Free-text description supplied by the citizen.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Current lifecycle stage.
    pub const fn status(&self) -> ComplaintStatus {
        self.status
    }

    /// Assigned department, when triaged.
    pub const fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    /// Creation timestamp stamped by the store; immutable.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComplaintDto {
    id: i32,
    user_id: i32,
    #[serde(rename = "type")]
    kind: ComplaintKind,
    description: String,
    status: ComplaintStatus,
    department_id: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintDto {
    fn from(value: Complaint) -> Self {
        Self {
            id: value.id.get(),
            user_id: value.user_id.get(),
            kind: value.kind,
            description: value.description,
            status: value.status,
            department_id: value.department_id.map(DepartmentId::get),
            created_at: value.created_at,
        }
    }
}

impl From<ComplaintDto> for Complaint {
    fn from(value: ComplaintDto) -> Self {
        Self {
            id: ComplaintId::new(value.id),
            user_id: UserId::new(value.user_id),
            kind: value.kind,
            description: value.description,
            status: value.status,
            department_id: value.department_id.map(DepartmentId::new),
            created_at: value.created_at,
        }
    }
}

/// Validated submission payload awaiting insertion.
///
/// The server stamps owner, status, department, and creation time; callers
/// only ever choose a kind and a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    kind: ComplaintKind,
    description: String,
}

impl NewComplaint {
    /// Validate raw submission inputs, collecting every failing field.
    pub fn try_from_parts(
        kind: &str,
        description: &str,
    ) -> Result<Self, Vec<ComplaintValidationError>> {
        let mut errors = Vec::new();

        let kind = match ComplaintKind::parse(kind) {
            Ok(kind) => Some(kind),
            Err(error) => {
                errors.push(error);
                None
            }
        };
        if description.chars().count() < DESCRIPTION_MIN {
            errors.push(ComplaintValidationError::DescriptionTooShort {
                min: DESCRIPTION_MIN,
            });
        }

        match (kind, errors.is_empty()) {
            (Some(kind), true) => Ok(Self {
                kind,
                description: description.to_owned(),
            }),
            _ => Err(errors),
        }
    }

    /// Kind of submission.
    pub const fn kind(&self) -> ComplaintKind {
        self.kind
    }

    /// Validated description text.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}
