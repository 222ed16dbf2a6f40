//! Department registry: public listing and idempotent startup seeding.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::department::{DEFAULT_DEPARTMENTS, Department, NewDepartment};
use crate::domain::error::Error;
use crate::domain::ports::{DepartmentPersistenceError, DepartmentRepository, DepartmentsQuery};

/// Result of one bootstrap pass over the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The registry was empty; the fixed list was inserted.
    Applied {
        /// Number of departments inserted.
        count: usize,
    },
    /// The registry already held rows; nothing was inserted.
    AlreadySeeded,
}

/// Registry service backed by the department store.
#[derive(Clone)]
pub struct DepartmentRegistry {
    departments: Arc<dyn DepartmentRepository>,
}

impl DepartmentRegistry {
    /// Create a registry over the given department store.
    pub fn new(departments: Arc<dyn DepartmentRepository>) -> Self {
        Self { departments }
    }

    /// Insert the fixed department list if the registry is empty.
    ///
    /// The emptiness check makes re-running safe on every restart. It does
    /// not detect a partially emptied table; no exposed interface deletes
    /// departments, so that state cannot arise through this service.
    pub async fn seed_defaults(&self) -> Result<SeedOutcome, Error> {
        let existing = self
            .departments
            .list()
            .await
            .map_err(map_department_persistence_error)?;
        if !existing.is_empty() {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        for (name, description) in DEFAULT_DEPARTMENTS {
            let department = NewDepartment {
                name: name.to_owned(),
                description: Some(description.to_owned()),
            };
            self.departments
                .insert(&department)
                .await
                .map_err(map_department_persistence_error)?;
        }
        Ok(SeedOutcome::Applied {
            count: DEFAULT_DEPARTMENTS.len(),
        })
    }
}

pub(crate) fn map_department_persistence_error(error: DepartmentPersistenceError) -> Error {
    match error {
        DepartmentPersistenceError::Connection { message } => Error::service_unavailable(message),
        DepartmentPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl DepartmentsQuery for DepartmentRegistry {
    async fn list(&self) -> Result<Vec<Department>, Error> {
        self.departments
            .list()
            .await
            .map_err(map_department_persistence_error)
    }
}
