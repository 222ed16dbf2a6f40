//! Citizen complaint endpoints: submission and the owner listing.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, Complaint, Error, NewComplaint, User};
use crate::inbound::http::actor::require_actor;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{complaint_field_error, validation_error};

/// Submission request body for `POST /api/complaints`.
///
/// Kind and description arrive as raw strings so one response can itemize
/// every failing field instead of stopping at the first enum mismatch.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SubmitComplaintRequest {
    /// One of `COMPLAINT`, `QUERY`, or `SUGGESTION`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-text description, at least 10 characters.
    pub description: String,
}

/// File a complaint owned by the session user.
///
/// The server stamps owner, `pending` status, a null department, and the
/// creation time; submitted values for those fields do not exist in the
/// payload shape at all.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = SubmitComplaintRequest,
    responses(
        (status = 201, description = "Complaint created", body = Complaint),
        (status = 400, description = "Invalid submission payload", body = Error),
        (status = 401, description = "No active session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "submitComplaint"
)]
#[post("/complaints")]
pub async fn submit_complaint(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let actor = require_actor(&session, &state.users).await?;
    let new_complaint = NewComplaint::try_from_parts(&payload.kind, &payload.description)
        .map_err(|errors| validation_error(errors.iter().map(complaint_field_error).collect()))?;

    let complaint = state.triage.submit(&actor, &new_complaint).await?;
    Ok(HttpResponse::Created().json(complaint))
}

/// List the session user's own complaints.
#[utoipa::path(
    get,
    path = "/api/complaints",
    responses(
        (status = 200, description = "The caller's complaints", body = [Complaint]),
        (status = 401, description = "No active session", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listOwnComplaints"
)]
#[get("/complaints")]
pub async fn list_own_complaints(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Complaint>>> {
    let actor: User = require_actor(&session, &state.users).await?;
    let complaints = state.triage.own_complaints(&actor).await?;
    Ok(web::Json(complaints))
}
