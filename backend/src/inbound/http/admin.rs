//! Administrator endpoints: dashboards, triage, and role management.
//!
//! Every handler resolves the session actor and passes the admin gate before
//! touching payloads, so a non-admin always sees 403 even for a malformed
//! body.

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApiResult, Complaint, ComplaintId, ComplaintStatus, ComplaintValidationError, DepartmentId,
    Error, RoleAssignment, User, authz,
};
use crate::inbound::http::actor::require_actor;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldError, complaint_field_error, validation_error,
};

/// Status change body for `PATCH /api/admin/complaints/{id}/status`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct StatusUpdateRequest {
    /// One of `pending`, `processing`, `resolved`, or `rejected`.
    pub status: String,
}

/// Assignment body for `PATCH /api/admin/complaints/{id}/department`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignDepartmentRequest {
    /// Target department identifier; must be positive.
    pub department_id: i32,
}

/// Role change body for `PATCH /api/admin/users/{id}/role`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdateRequest {
    /// Whether the user becomes a department head.
    pub is_department_head: bool,
    /// Owning department for a head; null clears the assignment.
    pub department_id: Option<i32>,
}

fn parse_department_id(value: i32) -> Result<DepartmentId, Error> {
    if value <= 0 {
        let error = ComplaintValidationError::NonPositiveDepartment { value };
        return Err(validation_error(vec![complaint_field_error(&error)]));
    }
    Ok(DepartmentId::new(value))
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "No active session", body = Error),
        (status = 403, description = "Administrator capability required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    let actor = require_actor(&session, &state.users).await?;
    authz::require_admin(&actor)?;
    let users = state.users.list_all().await?;
    Ok(web::Json(users))
}

/// List every complaint in the ledger.
#[utoipa::path(
    get,
    path = "/api/admin/complaints",
    responses(
        (status = 200, description = "All complaints", body = [Complaint]),
        (status = 401, description = "No active session", body = Error),
        (status = 403, description = "Administrator capability required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListComplaints"
)]
#[get("/admin/complaints")]
pub async fn list_all_complaints(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Complaint>>> {
    let actor = require_actor(&session, &state.users).await?;
    let complaints = state.triage.all_complaints(&actor).await?;
    Ok(web::Json(complaints))
}

/// Move a complaint into any lifecycle status.
#[utoipa::path(
    patch,
    path = "/api/admin/complaints/{id}/status",
    params(("id" = i32, Path, description = "Complaint identifier")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated complaint", body = Complaint),
        (status = 400, description = "Unknown status value", body = Error),
        (status = 401, description = "No active session", body = Error),
        (status = 403, description = "Administrator capability required", body = Error),
        (status = 404, description = "Complaint not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminSetComplaintStatus"
)]
#[patch("/admin/complaints/{id}/status")]
pub async fn set_complaint_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<Complaint>> {
    let actor = require_actor(&session, &state.users).await?;
    authz::require_admin(&actor)?;
    let status = ComplaintStatus::parse(&payload.status)
        .map_err(|error| validation_error(vec![complaint_field_error(&error)]))?;

    let complaint = state
        .triage
        .admin_set_status(&actor, ComplaintId::new(path.into_inner()), status)
        .await?;
    Ok(web::Json(complaint))
}

/// Assign a complaint to a department.
///
/// Assignment restarts triage: the status moves to `processing` in the same
/// write, whatever it was before.
#[utoipa::path(
    patch,
    path = "/api/admin/complaints/{id}/department",
    params(("id" = i32, Path, description = "Complaint identifier")),
    request_body = AssignDepartmentRequest,
    responses(
        (status = 200, description = "Updated complaint, status forced to processing", body = Complaint),
        (status = 400, description = "Invalid department identifier", body = Error),
        (status = 401, description = "No active session", body = Error),
        (status = 403, description = "Administrator capability required", body = Error),
        (status = 404, description = "Complaint not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminAssignComplaintDepartment"
)]
#[patch("/admin/complaints/{id}/department")]
pub async fn assign_complaint_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<AssignDepartmentRequest>,
) -> ApiResult<web::Json<Complaint>> {
    let actor = require_actor(&session, &state.users).await?;
    authz::require_admin(&actor)?;
    let department = parse_department_id(payload.department_id)?;

    let complaint = state
        .triage
        .admin_assign_department(&actor, ComplaintId::new(path.into_inner()), department)
        .await?;
    Ok(web::Json(complaint))
}

/// Change a user's department-head capability.
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/role",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = RoleUpdateRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Head without a department", body = Error),
        (status = 401, description = "No active session", body = Error),
        (status = 403, description = "Administrator capability required", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminSetUserRole"
)]
#[patch("/admin/users/{id}/role")]
pub async fn set_user_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<RoleUpdateRequest>,
) -> ApiResult<web::Json<User>> {
    let actor = require_actor(&session, &state.users).await?;
    authz::require_admin(&actor)?;

    let department_id = payload
        .department_id
        .map(parse_department_id)
        .transpose()?;
    let assignment = RoleAssignment::try_new(payload.is_department_head, department_id)
        .map_err(|error| {
            validation_error(vec![FieldError::new(
                "departmentId",
                "head_without_department",
                error.to_string(),
            )])
        })?;

    let user = state
        .roles
        .assign_role(crate::domain::UserId::new(path.into_inner()), assignment)
        .await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn department_identifiers_must_be_positive(#[case] value: i32) {
        let error = parse_department_id(value).expect_err("non-positive identifier");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[test]
    fn positive_department_identifiers_pass_through() {
        let id = parse_department_id(3).expect("positive identifier");
        assert_eq!(id, DepartmentId::new(3));
    }
}
