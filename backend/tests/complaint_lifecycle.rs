//! End-to-end complaint lifecycle flows across the three roles.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::domain::{DepartmentId, Roles};
use serde_json::{Value, json};

use support::{login_as, portal, portal_app};

fn staff_roles(admin: bool, head_of: Option<i32>) -> Roles {
    Roles {
        is_admin: admin,
        is_department_head: head_of.is_some(),
        department_id: head_of.map(DepartmentId::new),
    }
}

#[actix_web::test]
async fn submissions_start_pending_and_unassigned() {
    let portal = portal();
    portal
        .users
        .seed_user("citizen1", "secret1", Roles::default());
    let app = test::init_service(portal_app(portal.state.clone())).await;
    let cookie = login_as(&app, "citizen1", "secret1").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/complaints")
            .cookie(cookie.clone())
            .set_json(json!({
                "type": "SUGGESTION",
                "description": "Más luminarias en la plaza central",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["departmentId"], Value::Null);
    assert_eq!(body["type"], "SUGGESTION");
    assert!(body["createdAt"].is_string());

    let listed = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/complaints")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let listed: Value = test::read_body_json(listed).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn short_descriptions_are_rejected_and_never_persisted() {
    let portal = portal();
    portal
        .users
        .seed_user("citizen1", "secret1", Roles::default());
    let app = test::init_service(portal_app(portal.state.clone())).await;
    let cookie = login_as(&app, "citizen1", "secret1").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/complaints")
            .cookie(cookie.clone())
            .set_json(json!({ "type": "QUERY", "description": "muy corto" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body["details"]["fieldErrors"][0]["code"],
        "description_too_short"
    );

    let listed = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/complaints")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let listed: Value = test::read_body_json(listed).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn submission_requires_a_session() {
    let portal = portal();
    let app = test::init_service(portal_app(portal.state.clone())).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(json!({
                "type": "QUERY",
                "description": "Necesito ayuda con mi pago",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// The full intake-to-resolution walk: a citizen files a query, an admin
/// routes it to department 3, the head of department 3 resolves it, and the
/// head of department 4 is turned away.
#[actix_web::test]
async fn query_flows_from_intake_to_resolution() {
    let portal = portal();
    portal
        .users
        .seed_user("citizen1", "secret1", Roles::default());
    portal
        .users
        .seed_user("admin1", "secret1", staff_roles(true, None));
    portal
        .users
        .seed_user("head3", "secret1", staff_roles(false, Some(3)));
    portal
        .users
        .seed_user("head4", "secret1", staff_roles(false, Some(4)));
    let app = test::init_service(portal_app(portal.state.clone())).await;

    let citizen = login_as(&app, "citizen1", "secret1").await;
    let submitted = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/complaints")
            .cookie(citizen)
            .set_json(json!({
                "type": "QUERY",
                "description": "Necesito ayuda con mi pago",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(submitted.status(), StatusCode::CREATED);
    let submitted: Value = test::read_body_json(submitted).await;
    assert_eq!(submitted["status"], "pending");
    assert_eq!(submitted["departmentId"], Value::Null);
    let id = submitted["id"].as_i64().expect("complaint id");

    let admin = login_as(&app, "admin1", "secret1").await;
    let assigned = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/complaints/{id}/department"))
            .cookie(admin)
            .set_json(json!({ "departmentId": 3 }))
            .to_request(),
    )
    .await;
    assert_eq!(assigned.status(), StatusCode::OK);
    let assigned: Value = test::read_body_json(assigned).await;
    assert_eq!(assigned["status"], "processing");
    assert_eq!(assigned["departmentId"], 3);

    let head4 = login_as(&app, "head4", "secret1").await;
    let refused = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/department/complaints/{id}/status"))
            .cookie(head4)
            .set_json(json!({ "status": "resolved" }))
            .to_request(),
    )
    .await;
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);
    let refused: Value = test::read_body_json(refused).await;
    assert_eq!(refused["message"], "complaint does not belong to your department");

    let head3 = login_as(&app, "head3", "secret1").await;
    let resolved = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/department/complaints/{id}/status"))
            .cookie(head3)
            .set_json(json!({ "status": "resolved" }))
            .to_request(),
    )
    .await;
    assert_eq!(resolved.status(), StatusCode::OK);
    let resolved: Value = test::read_body_json(resolved).await;
    assert_eq!(resolved["status"], "resolved");
}

/// Reassigning a closed ticket reopens it: documented behaviour, not an
/// accident. Assignment always restarts triage at `processing`.
#[actix_web::test]
async fn reassignment_reopens_a_resolved_complaint() {
    let portal = portal();
    portal
        .users
        .seed_user("citizen1", "secret1", Roles::default());
    portal
        .users
        .seed_user("admin1", "secret1", staff_roles(true, None));
    let app = test::init_service(portal_app(portal.state.clone())).await;

    let citizen = login_as(&app, "citizen1", "secret1").await;
    let submitted = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/complaints")
            .cookie(citizen)
            .set_json(json!({
                "type": "COMPLAINT",
                "description": "Bache enorme en la avenida principal",
            }))
            .to_request(),
    )
    .await;
    let submitted: Value = test::read_body_json(submitted).await;
    let id = submitted["id"].as_i64().expect("complaint id");

    let admin = login_as(&app, "admin1", "secret1").await;
    let resolved = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/complaints/{id}/status"))
            .cookie(admin.clone())
            .set_json(json!({ "status": "resolved" }))
            .to_request(),
    )
    .await;
    assert_eq!(resolved.status(), StatusCode::OK);

    let reassigned = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/complaints/{id}/department"))
            .cookie(admin)
            .set_json(json!({ "departmentId": 2 }))
            .to_request(),
    )
    .await;
    assert_eq!(reassigned.status(), StatusCode::OK);
    let reassigned: Value = test::read_body_json(reassigned).await;
    assert_eq!(reassigned["status"], "processing");
    assert_eq!(reassigned["departmentId"], 2);
}

#[actix_web::test]
async fn desks_cannot_return_a_complaint_to_pending() {
    let portal = portal();
    portal
        .users
        .seed_user("citizen1", "secret1", Roles::default());
    portal
        .users
        .seed_user("admin1", "secret1", staff_roles(true, None));
    portal
        .users
        .seed_user("head3", "secret1", staff_roles(false, Some(3)));
    let app = test::init_service(portal_app(portal.state.clone())).await;

    let citizen = login_as(&app, "citizen1", "secret1").await;
    let submitted = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/complaints")
            .cookie(citizen)
            .set_json(json!({
                "type": "QUERY",
                "description": "Consulta sobre el calendario de recolección",
            }))
            .to_request(),
    )
    .await;
    let submitted: Value = test::read_body_json(submitted).await;
    let id = submitted["id"].as_i64().expect("complaint id");

    let admin = login_as(&app, "admin1", "secret1").await;
    test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/complaints/{id}/department"))
            .cookie(admin)
            .set_json(json!({ "departmentId": 3 }))
            .to_request(),
    )
    .await;

    let head3 = login_as(&app, "head3", "secret1").await;
    let refused = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/department/complaints/{id}/status"))
            .cookie(head3)
            .set_json(json!({ "status": "pending" }))
            .to_request(),
    )
    .await;
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    let refused: Value = test::read_body_json(refused).await;
    assert_eq!(
        refused["details"]["fieldErrors"][0]["code"],
        "status_not_assignable"
    );
}

#[actix_web::test]
async fn desk_updates_on_missing_complaints_are_not_found() {
    let portal = portal();
    portal
        .users
        .seed_user("head3", "secret1", staff_roles(false, Some(3)));
    let app = test::init_service(portal_app(portal.state.clone())).await;
    let head3 = login_as(&app, "head3", "secret1").await;

    let response = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/api/department/complaints/41/status")
            .cookie(head3)
            .set_json(json!({ "status": "resolved" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
