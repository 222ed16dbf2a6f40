//! Driven port for department-registry persistence adapters.

use async_trait::async_trait;

use crate::domain::department::{Department, NewDepartment};

/// Persistence errors raised by department-registry adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DepartmentPersistenceError {
    /// Repository connection could not be established.
    #[error("department registry connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("department registry query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
}

impl DepartmentPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Department-registry persistence port.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// List every department in identifier order.
    async fn list(&self) -> Result<Vec<Department>, DepartmentPersistenceError>;

    /// Insert a department; the store assigns the identifier.
    async fn insert(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, DepartmentPersistenceError>;
}
