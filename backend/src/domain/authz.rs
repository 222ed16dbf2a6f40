//! Authorization gate: per-request capability checks over the resolved user.
//!
//! Roles are two independent boolean capabilities, never a hierarchy.
//! Handlers and the triage service compose these checks per operation; an
//! admin is not implicitly a department head and vice versa.

use crate::domain::department::DepartmentId;
use crate::domain::error::Error;
use crate::domain::user::User;

/// Require the administrator capability.
pub fn require_admin(actor: &User) -> Result<(), Error> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(Error::forbidden("administrator capability required"))
    }
}

/// Require the department-head capability.
pub fn require_department_head(actor: &User) -> Result<(), Error> {
    if actor.is_department_head() {
        Ok(())
    } else {
        Err(Error::forbidden("department head capability required"))
    }
}

/// Resolve the department a head acts for.
///
/// A head without a department is a data defect the role endpoint guards
/// against, but legacy rows may still exist; surface it as a validation
/// failure rather than a forbidden.
pub fn own_department(actor: &User) -> Result<DepartmentId, Error> {
    actor
        .department_id()
        .ok_or_else(|| Error::invalid_request("user is not assigned to a department"))
}
