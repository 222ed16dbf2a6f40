//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{AccountServiceImpl, DepartmentRegistry, TriageService, UserDirectory};
use backend::inbound::http::admin::{
    assign_complaint_department, list_all_complaints, list_users, set_complaint_status,
    set_user_role,
};
use backend::inbound::http::auth::{current_user, login, logout, register};
use backend::inbound::http::complaints::{list_own_complaints, submit_complaint};
use backend::inbound::http::department::{
    list_department_complaints, set_department_complaint_status,
};
use backend::inbound::http::departments::list_departments;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselComplaintRepository, DieselDepartmentRepository, DieselUserRepository,
};
use backend::outbound::security::Argon2CredentialHasher;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Assemble HTTP state from database-backed adapters.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let complaints = Arc::new(DieselComplaintRepository::new(config.db_pool.clone()));
    let departments = Arc::new(DieselDepartmentRepository::new(config.db_pool.clone()));

    let directory = Arc::new(UserDirectory::new(users.clone()));
    HttpState::new(
        Arc::new(AccountServiceImpl::new(
            users,
            Arc::new(Argon2CredentialHasher),
        )),
        directory.clone(),
        directory,
        Arc::new(DepartmentRegistry::new(departments)),
        Arc::new(TriageService::new(complaints)),
    )
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(current_user)
        .service(submit_complaint)
        .service(list_own_complaints)
        .service(list_departments)
        .service(list_users)
        .service(list_all_complaints)
        .service(set_complaint_status)
        .service(assign_complaint_department)
        .service(set_user_role)
        .service(list_department_complaints)
        .service(set_department_complaint_status);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
