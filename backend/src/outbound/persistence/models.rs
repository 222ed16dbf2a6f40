//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Row-to-domain conversion lives here so the
//! repositories stay thin.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Complaint, ComplaintId, ComplaintKind, ComplaintStatus, Department, DepartmentId, Roles, User,
    UserId,
};

use super::schema::{complaints, departments, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_department_head: bool,
    pub department_id: Option<i32>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> User {
        User::new(
            UserId::new(self.id),
            self.username,
            self.full_name,
            self.email,
            Roles {
                is_admin: self.is_admin,
                is_department_head: self.is_department_head,
                department_id: self.department_id.map(DepartmentId::new),
            },
        )
    }
}

/// Insertable struct for registrations; role flags use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
}

/// Row struct for reading from the departments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DepartmentRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl DepartmentRow {
    pub(crate) fn into_department(self) -> Department {
        Department::new(DepartmentId::new(self.id), self.name, self.description)
    }
}

/// Insertable struct for seeding departments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = departments)]
pub(crate) struct NewDepartmentRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Row struct for reading from the complaints table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ComplaintRow {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub description: String,
    pub status: String,
    pub department_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Failure converting a stored row into a domain complaint.
///
/// Kind and status columns are constrained at write time; a value outside
/// the closed enums means the row was mutated outside this service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("complaint row {id} holds unexpected {column} value {value:?}")]
pub(crate) struct ComplaintRowError {
    pub id: i32,
    pub column: &'static str,
    pub value: String,
}

impl ComplaintRow {
    pub(crate) fn into_complaint(self) -> Result<Complaint, ComplaintRowError> {
        let kind = ComplaintKind::parse(&self.kind).map_err(|_| ComplaintRowError {
            id: self.id,
            column: "type",
            value: self.kind.clone(),
        })?;
        let status = ComplaintStatus::parse(&self.status).map_err(|_| ComplaintRowError {
            id: self.id,
            column: "status",
            value: self.status.clone(),
        })?;
        Ok(Complaint::new(
            ComplaintId::new(self.id),
            UserId::new(self.user_id),
            kind,
            self.description,
            status,
            self.department_id.map(DepartmentId::new),
            self.created_at,
        ))
    }
}

/// Insertable struct for submissions; id and timestamp use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = complaints)]
pub(crate) struct NewComplaintRow<'a> {
    pub user_id: i32,
    pub kind: &'a str,
    pub description: &'a str,
    pub status: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complaint_row(kind: &str, status: &str) -> ComplaintRow {
        ComplaintRow {
            id: 1,
            user_id: 7,
            kind: kind.to_owned(),
            description: "Necesito ayuda con mi pago".to_owned(),
            status: status.to_owned(),
            department_id: None,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
        }
    }

    #[test]
    fn well_formed_rows_convert() {
        let complaint = complaint_row("QUERY", "pending")
            .into_complaint()
            .expect("row converts");
        assert_eq!(complaint.kind(), ComplaintKind::Query);
        assert_eq!(complaint.status(), ComplaintStatus::Pending);
    }

    #[test]
    fn corrupted_status_is_reported_with_the_column() {
        let error = complaint_row("QUERY", "archived")
            .into_complaint()
            .expect_err("unknown status");
        assert_eq!(error.column, "status");
        assert_eq!(error.value, "archived");
    }
}
