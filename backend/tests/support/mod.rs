//! Shared wiring for endpoint integration tests.
//!
//! Builds the full API surface over the in-memory port implementations so
//! whole request flows, session cookies included, run without a database.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, test, web};

use backend::domain::{AccountServiceImpl, DepartmentRegistry, TriageService, UserDirectory};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::test_utils::test_session_middleware;
use backend::inbound::http::{admin, auth, complaints, department, departments};
use backend::test_support::{
    InMemoryComplaintRepository, InMemoryDepartmentRepository, InMemoryUserRepository,
    PlainTextCredentialHasher,
};

/// In-memory backing stores plus the HTTP state wired over them.
pub struct TestPortal {
    /// Identity store; seed staff accounts through it.
    pub users: Arc<InMemoryUserRepository>,
    /// Complaint ledger.
    pub complaints: Arc<InMemoryComplaintRepository>,
    /// Department registry store.
    pub departments: Arc<InMemoryDepartmentRepository>,
    /// Registry service, exposed for seeding in tests.
    pub registry: DepartmentRegistry,
    /// Handler dependency bundle.
    pub state: HttpState,
}

/// Wire a fresh portal over empty in-memory stores.
pub fn portal() -> TestPortal {
    let users = Arc::new(InMemoryUserRepository::new());
    let complaints = Arc::new(InMemoryComplaintRepository::new());
    let departments = Arc::new(InMemoryDepartmentRepository::new());

    let directory = Arc::new(UserDirectory::new(users.clone()));
    let registry = DepartmentRegistry::new(departments.clone());
    let state = HttpState::new(
        Arc::new(AccountServiceImpl::new(
            users.clone(),
            Arc::new(PlainTextCredentialHasher),
        )),
        directory.clone(),
        directory,
        Arc::new(registry.clone()),
        Arc::new(TriageService::new(complaints.clone())),
    );

    TestPortal {
        users,
        complaints,
        departments,
        registry,
        state,
    }
}

/// Build the API app the way the server binary wires it.
pub fn portal_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .wrap(test_session_middleware())
        .service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::current_user)
        .service(complaints::submit_complaint)
        .service(complaints::list_own_complaints)
        .service(departments::list_departments)
        .service(admin::list_users)
        .service(admin::list_all_complaints)
        .service(admin::set_complaint_status)
        .service(admin::assign_complaint_department)
        .service(admin::set_user_role)
        .service(department::list_department_complaints)
        .service(department::set_department_complaint_status);

    App::new().app_data(web::Data::new(state)).service(api)
}

/// Log in through the API and return the session cookie.
pub async fn login_as<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert!(
        response.status().is_success(),
        "login as {username} failed: {}",
        response.status()
    );
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}
