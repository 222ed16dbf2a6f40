//! Account endpoints: registration, login, logout, and the session user.
//!
//! ```text
//! POST /api/register {"username":"mgarcia","password":"secret1",...}
//! POST /api/login    {"username":"mgarcia","password":"secret1"}
//! POST /api/logout
//! GET  /api/user
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, Error, LoginCredentials, LoginValidationError, NewUser, User};
use crate::inbound::http::actor::require_actor;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldError, registration_field_error, validation_error,
};

/// Registration request body for `POST /api/register`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Unique login handle.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Display name shown on dashboards.
    pub full_name: String,
    /// Contact address.
    pub email: String,
}

/// Login request body for `POST /api/login`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Unique login handle.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

fn map_login_validation_error(error: &LoginValidationError) -> Error {
    let field_error = match error {
        LoginValidationError::EmptyUsername => {
            FieldError::new("username", "empty_username", error.to_string())
        }
        LoginValidationError::EmptyPassword => {
            FieldError::new("password", "empty_password", error.to_string())
        }
    };
    validation_error(vec![field_error])
}

/// Register a citizen account and establish a session.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; session established", body = User),
        (status = 400, description = "Invalid registration payload", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let new_user = NewUser::try_from_parts(
        &payload.username,
        &payload.password,
        &payload.full_name,
        &payload.email,
    )
    .map_err(|errors| {
        validation_error(errors.iter().map(registration_field_error).collect())
    })?;

    let user = state.accounts.register(&new_user).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
         headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(|error| map_login_validation_error(&error))?;
    let user = state.accounts.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(user))
}

/// Drop the caller's session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 204, description = "Session purged"),
        (status = 401, description = "No active session", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

/// Return the session user.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "The authenticated user", body = User),
        (status = 401, description = "No active session", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let actor = require_actor(&session, &state.users).await?;
    Ok(web::Json(actor))
}
