//! Driving port for the public department listing.

use async_trait::async_trait;

use crate::domain::department::Department;
use crate::domain::error::Error;

/// Domain use-case port for reading the department registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentsQuery: Send + Sync {
    /// Return every department in identifier order.
    async fn list(&self) -> Result<Vec<Department>, Error>;
}
