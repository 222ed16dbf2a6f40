//! Driving port for complaint submission, listing, and triage.
//!
//! Every method receives the session-resolved actor explicitly; the
//! implementation owns the role and department-scope rules, so inbound
//! adapters stay free of lifecycle logic.

use async_trait::async_trait;

use crate::domain::complaint::{Complaint, ComplaintId, ComplaintStatus, DeskStatus, NewComplaint};
use crate::domain::department::DepartmentId;
use crate::domain::error::Error;
use crate::domain::user::User;

/// Domain use-case port for the complaint lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintTriage: Send + Sync {
    /// File a submission owned by the actor; status starts at `pending` with
    /// no department.
    async fn submit(&self, actor: &User, complaint: &NewComplaint) -> Result<Complaint, Error>;

    /// List the actor's own submissions.
    async fn own_complaints(&self, actor: &User) -> Result<Vec<Complaint>, Error>;

    /// List every complaint in the ledger. Administrator capability required.
    async fn all_complaints(&self, actor: &User) -> Result<Vec<Complaint>, Error>;

    /// List the complaints assigned to the actor's department.
    /// Department-head capability and an owning department required.
    async fn department_complaints(&self, actor: &User) -> Result<Vec<Complaint>, Error>;

    /// Move a complaint into any lifecycle status. Administrator capability
    /// required.
    async fn admin_set_status(
        &self,
        actor: &User,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, Error>;

    /// Assign a complaint to a department, forcing `status = processing`
    /// regardless of the previous state. Administrator capability required.
    async fn admin_assign_department(
        &self,
        actor: &User,
        id: ComplaintId,
        department: DepartmentId,
    ) -> Result<Complaint, Error>;

    /// Advance or close a complaint assigned to the actor's department.
    /// Department-head capability required; complaints outside the actor's
    /// department are forbidden, never silently skipped.
    async fn desk_set_status(
        &self,
        actor: &User,
        id: ComplaintId,
        status: DeskStatus,
    ) -> Result<Complaint, Error>;
}
