//! Driven port for complaint-ledger persistence adapters.

use async_trait::async_trait;

use crate::domain::complaint::{Complaint, ComplaintId, ComplaintStatus, NewComplaint};
use crate::domain::department::DepartmentId;
use crate::domain::user::UserId;

/// Persistence errors raised by complaint-ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplaintPersistenceError {
    /// Repository connection could not be established.
    #[error("complaint ledger connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("complaint ledger query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
}

impl ComplaintPersistenceError {
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
}

/// Field changes applied to a complaint in one storage round trip.
///
/// Department assignment and its forced status change travel together so the
/// two writes cannot be separated by a concurrent update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriageUpdate {
    /// New lifecycle status, when changing.
    pub status: Option<ComplaintStatus>,
    /// New owning department, when assigning.
    pub department: Option<DepartmentId>,
}

/// Complaint-ledger persistence port.
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Append a submission; the store stamps identifier and creation time.
    async fn insert(
        &self,
        owner: UserId,
        complaint: &NewComplaint,
    ) -> Result<Complaint, ComplaintPersistenceError>;

    /// Fetch a complaint by identifier.
    async fn find_by_id(
        &self,
        id: ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError>;

    /// List the complaints a citizen submitted, in identifier order.
    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Complaint>, ComplaintPersistenceError>;

    /// List the complaints assigned to a department, in identifier order.
    async fn list_by_department(
        &self,
        department: DepartmentId,
    ) -> Result<Vec<Complaint>, ComplaintPersistenceError>;

    /// List every complaint in the ledger, in identifier order.
    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintPersistenceError>;

    /// Apply a triage update, returning the updated record or `None` when
    /// the identifier matches no complaint. Last write wins; there is no
    /// conflict detection.
    async fn apply(
        &self,
        id: ComplaintId,
        update: TriageUpdate,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError>;
}
