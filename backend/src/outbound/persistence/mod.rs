//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! Principles:
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leak to the domain layer.
//! - **Typed errors**: every Diesel and pool failure maps onto the port
//!   error enums.

mod diesel_complaint_repository;
mod diesel_department_repository;
mod diesel_user_repository;
mod migrate;
mod models;
mod pool;
mod schema;

pub use diesel_complaint_repository::DieselComplaintRepository;
pub use diesel_department_repository::DieselDepartmentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrate::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
