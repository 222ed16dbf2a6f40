//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, ComplaintTriage, DepartmentsQuery, UserRoleCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login use-cases.
    pub accounts: Arc<dyn AccountService>,
    /// Identity lookups and the admin user listing.
    pub users: Arc<dyn UsersQuery>,
    /// Administrator role management.
    pub roles: Arc<dyn UserRoleCommand>,
    /// Public department listing.
    pub departments: Arc<dyn DepartmentsQuery>,
    /// Complaint submission, listing, and triage.
    pub triage: Arc<dyn ComplaintTriage>,
}

impl HttpState {
    /// Bundle the port implementations handlers depend on.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        users: Arc<dyn UsersQuery>,
        roles: Arc<dyn UserRoleCommand>,
        departments: Arc<dyn DepartmentsQuery>,
        triage: Arc<dyn ComplaintTriage>,
    ) -> Self {
        Self {
            accounts,
            users,
            roles,
            departments,
            triage,
        }
    }
}
