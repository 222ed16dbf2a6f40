//! PostgreSQL-backed `ComplaintRepository` implementation using Diesel ORM.
//!
//! Triage updates run as a single `UPDATE ... RETURNING` statement so a
//! department assignment and its forced status change land atomically.
//! Concurrent updates race with last-write-wins semantics; there is no
//! conflict detection.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ComplaintPersistenceError, ComplaintRepository, TriageUpdate};
use crate::domain::{Complaint, ComplaintId, ComplaintStatus, DepartmentId, NewComplaint, UserId};

use super::models::{ComplaintRow, ComplaintRowError, NewComplaintRow};
use super::pool::{DbPool, PoolError};
use super::schema::complaints;

/// Diesel-backed implementation of the complaint-ledger port.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ComplaintPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ComplaintPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ComplaintPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ComplaintPersistenceError::connection("database connection error")
        }
        _ => ComplaintPersistenceError::query("database error"),
    }
}

fn map_row_error(error: ComplaintRowError) -> ComplaintPersistenceError {
    ComplaintPersistenceError::query(error.to_string())
}

fn rows_into_complaints(rows: Vec<ComplaintRow>) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
    rows.into_iter()
        .map(|row| row.into_complaint().map_err(map_row_error))
        .collect()
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(
        &self,
        owner: UserId,
        complaint: &NewComplaint,
    ) -> Result<Complaint, ComplaintPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewComplaintRow {
            user_id: owner.get(),
            kind: complaint.kind().as_str(),
            description: complaint.description(),
            status: ComplaintStatus::Pending.as_str(),
        };

        let inserted: ComplaintRow = diesel::insert_into(complaints::table)
            .values(&row)
            .returning(ComplaintRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        inserted.into_complaint().map_err(map_row_error)
    }

    async fn find_by_id(
        &self,
        id: ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ComplaintRow> = complaints::table
            .find(id.get())
            .select(ComplaintRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| row.into_complaint().map_err(map_row_error))
            .transpose()
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ComplaintRow> = complaints::table
            .filter(complaints::user_id.eq(owner.get()))
            .order(complaints::id.asc())
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_into_complaints(rows)
    }

    async fn list_by_department(
        &self,
        department: DepartmentId,
    ) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ComplaintRow> = complaints::table
            .filter(complaints::department_id.eq(department.get()))
            .order(complaints::id.asc())
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_into_complaints(rows)
    }

    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ComplaintRow> = complaints::table
            .order(complaints::id.asc())
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_into_complaints(rows)
    }

    async fn apply(
        &self,
        id: ComplaintId,
        update: TriageUpdate,
    ) -> Result<Option<Complaint>, ComplaintPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = complaints::table.find(id.get());

        let row: Option<ComplaintRow> = match (update.status, update.department) {
            (Some(status), Some(department)) => {
                diesel::update(target)
                    .set((
                        complaints::status.eq(status.as_str()),
                        complaints::department_id.eq(Some(department.get())),
                    ))
                    .returning(ComplaintRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            (Some(status), None) => {
                diesel::update(target)
                    .set(complaints::status.eq(status.as_str()))
                    .returning(ComplaintRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            (None, Some(department)) => {
                diesel::update(target)
                    .set(complaints::department_id.eq(Some(department.get())))
                    .returning(ComplaintRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            (None, None) => {
                // Nothing to change; behave as a read.
                target
                    .select(ComplaintRow::as_select())
                    .first(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(map_diesel_error)?;

        row.map(|row| row.into_complaint().map_err(map_row_error))
            .transpose()
    }
}
