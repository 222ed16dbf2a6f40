//! Municipal complaint portal backend library modules.
//!
//! Citizens file complaints, administrators and department heads triage them
//! through role-gated endpoints. The crate is organised hexagonally: the
//! domain owns entities, the authorization gate, and the lifecycle
//! controller; inbound adapters map HTTP onto it; outbound adapters persist
//! through Diesel/PostgreSQL and hash credentials with Argon2id.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seeding;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware applied to every route.
pub use middleware::trace::Trace;
