//! PostgreSQL-backed `DepartmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{DepartmentPersistenceError, DepartmentRepository};
use crate::domain::{Department, NewDepartment};

use super::models::{DepartmentRow, NewDepartmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::departments;

/// Diesel-backed implementation of the department-registry port.
#[derive(Clone)]
pub struct DieselDepartmentRepository {
    pool: DbPool,
}

impl DieselDepartmentRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DepartmentPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DepartmentPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> DepartmentPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DepartmentPersistenceError::connection("database connection error")
        }
        _ => DepartmentPersistenceError::query("database error"),
    }
}

#[async_trait]
impl DepartmentRepository for DieselDepartmentRepository {
    async fn list(&self) -> Result<Vec<Department>, DepartmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DepartmentRow> = departments::table
            .order(departments::id.asc())
            .select(DepartmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(DepartmentRow::into_department).collect())
    }

    async fn insert(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, DepartmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewDepartmentRow {
            name: &department.name,
            description: department.description.as_deref(),
        };

        let inserted: DepartmentRow = diesel::insert_into(departments::table)
            .values(&row)
            .returning(DepartmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.into_department())
    }
}
