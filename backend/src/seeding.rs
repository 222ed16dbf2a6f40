//! Startup seeding orchestration for the department registry.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DepartmentRegistry, Error, SeedOutcome};
use crate::outbound::persistence::{DbPool, DieselDepartmentRepository};

/// Seed the fixed department list on startup when the registry is empty.
///
/// Safe to run on every restart: a non-empty registry short-circuits before
/// any insert.
///
/// # Errors
///
/// Propagates registry failures; startup should abort rather than serve a
/// portal without departments.
pub async fn seed_departments_on_startup(pool: &DbPool) -> Result<SeedOutcome, Error> {
    let repository = DieselDepartmentRepository::new(pool.clone());
    let registry = DepartmentRegistry::new(Arc::new(repository));

    let outcome = registry.seed_defaults().await?;
    match outcome {
        SeedOutcome::Applied { count } => {
            info!(count, "department registry seeded");
        }
        SeedOutcome::AlreadySeeded => {
            info!("department registry already seeded; skipping");
        }
    }
    Ok(outcome)
}
