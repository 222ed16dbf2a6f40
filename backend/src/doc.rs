//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every HTTP endpoint, the domain schemas they exchange, and
//! the session-cookie security scheme. Swagger UI serves the document in
//! debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Complaint, ComplaintKind, ComplaintStatus, Department, Error, ErrorCode, User};
use crate::inbound::http::admin::{
    AssignDepartmentRequest, RoleUpdateRequest, StatusUpdateRequest,
};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::complaints::SubmitComplaintRequest;
use crate::inbound::http::department::DeskStatusRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login or POST /api/register.",
            ))),
        );
    }
}

/// OpenAPI document for the complaint-portal REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Municipal complaint portal API",
        description = "Citizen complaint intake and role-gated triage over session-cookie authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::complaints::submit_complaint,
        crate::inbound::http::complaints::list_own_complaints,
        crate::inbound::http::departments::list_departments,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::list_all_complaints,
        crate::inbound::http::admin::set_complaint_status,
        crate::inbound::http::admin::assign_complaint_department,
        crate::inbound::http::admin::set_user_role,
        crate::inbound::http::department::list_department_complaints,
        crate::inbound::http::department::set_department_complaint_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Department,
        Complaint,
        ComplaintKind,
        ComplaintStatus,
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        SubmitComplaintRequest,
        StatusUpdateRequest,
        AssignDepartmentRequest,
        RoleUpdateRequest,
        DeskStatusRequest,
    ))
)]
pub struct ApiDoc;
