//! Department-head endpoints: the desk queue and desk triage.

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, Complaint, ComplaintId, DeskStatus, Error, authz};
use crate::inbound::http::actor::require_actor;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{complaint_field_error, validation_error};

/// Status change body for `PATCH /api/department/complaints/{id}/status`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DeskStatusRequest {
    /// One of `processing`, `resolved`, or `rejected`; `pending` is refused.
    pub status: String,
}

/// List the complaints assigned to the session user's department.
#[utoipa::path(
    get,
    path = "/api/department/complaints",
    responses(
        (status = 200, description = "Complaints assigned to the caller's department", body = [Complaint]),
        (status = 400, description = "Caller has no department", body = Error),
        (status = 401, description = "No active session", body = Error),
        (status = 403, description = "Department-head capability required", body = Error)
    ),
    tags = ["department"],
    operation_id = "deskListComplaints"
)]
#[get("/department/complaints")]
pub async fn list_department_complaints(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Complaint>>> {
    let actor = require_actor(&session, &state.users).await?;
    let complaints = state.triage.department_complaints(&actor).await?;
    Ok(web::Json(complaints))
}

/// Advance or close a complaint assigned to the session user's department.
#[utoipa::path(
    patch,
    path = "/api/department/complaints/{id}/status",
    params(("id" = i32, Path, description = "Complaint identifier")),
    request_body = DeskStatusRequest,
    responses(
        (status = 200, description = "Updated complaint", body = Complaint),
        (status = 400, description = "Status not assignable by a desk", body = Error),
        (status = 401, description = "No active session", body = Error),
        (status = 403, description = "Not the caller's department", body = Error),
        (status = 404, description = "Complaint not found", body = Error)
    ),
    tags = ["department"],
    operation_id = "deskSetComplaintStatus"
)]
#[patch("/department/complaints/{id}/status")]
pub async fn set_department_complaint_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<DeskStatusRequest>,
) -> ApiResult<web::Json<Complaint>> {
    let actor = require_actor(&session, &state.users).await?;
    authz::require_department_head(&actor)?;
    let status = DeskStatus::parse(&payload.status)
        .map_err(|error| validation_error(vec![complaint_field_error(&error)]))?;

    let complaint = state
        .triage
        .desk_set_status(&actor, ComplaintId::new(path.into_inner()), status)
        .await?;
    Ok(web::Json(complaint))
}
