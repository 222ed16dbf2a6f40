//! Public department listing.

use actix_web::{get, web};

use crate::domain::{ApiResult, Department};
use crate::inbound::http::state::HttpState;

/// List every department. No authentication required: the submission form
/// shows the registry to anonymous visitors.
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "All departments", body = [Department])
    ),
    tags = ["departments"],
    operation_id = "listDepartments",
    security([])
)]
#[get("/departments")]
pub async fn list_departments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Department>>> {
    let departments = state.departments.list().await?;
    Ok(web::Json(departments))
}
