//! Ticket lifecycle controller.
//!
//! Owns every transition rule of the complaint state machine:
//!
//! - Administrators move complaints between any of the four states and are
//!   the only actors who assign departments.
//! - Department heads advance or close complaints assigned to their own
//!   department; they never touch other departments and never return a
//!   ticket to `pending`.
//! - Citizens submit and read their own complaints; they hold no transition
//!   rights at all.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::authz;
use crate::domain::complaint::{Complaint, ComplaintId, ComplaintStatus, DeskStatus, NewComplaint};
use crate::domain::department::DepartmentId;
use crate::domain::error::Error;
use crate::domain::ports::{
    ComplaintPersistenceError, ComplaintRepository, ComplaintTriage, TriageUpdate,
};
use crate::domain::user::User;

/// Lifecycle controller backed by the complaint ledger.
#[derive(Clone)]
pub struct TriageService {
    complaints: Arc<dyn ComplaintRepository>,
}

impl TriageService {
    /// Create a controller over the given ledger.
    pub fn new(complaints: Arc<dyn ComplaintRepository>) -> Self {
        Self { complaints }
    }

    async fn apply_or_not_found(
        &self,
        id: ComplaintId,
        update: TriageUpdate,
    ) -> Result<Complaint, Error> {
        self.complaints
            .apply(id, update)
            .await
            .map_err(map_complaint_persistence_error)?
            .ok_or_else(|| Error::not_found("complaint not found"))
    }
}

pub(crate) fn map_complaint_persistence_error(error: ComplaintPersistenceError) -> Error {
    match error {
        ComplaintPersistenceError::Connection { message } => Error::service_unavailable(message),
        ComplaintPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl ComplaintTriage for TriageService {
    async fn submit(&self, actor: &User, complaint: &NewComplaint) -> Result<Complaint, Error> {
        self.complaints
            .insert(actor.id(), complaint)
            .await
            .map_err(map_complaint_persistence_error)
    }

    async fn own_complaints(&self, actor: &User) -> Result<Vec<Complaint>, Error> {
        self.complaints
            .list_by_owner(actor.id())
            .await
            .map_err(map_complaint_persistence_error)
    }

    async fn all_complaints(&self, actor: &User) -> Result<Vec<Complaint>, Error> {
        authz::require_admin(actor)?;
        self.complaints
            .list_all()
            .await
            .map_err(map_complaint_persistence_error)
    }

    async fn department_complaints(&self, actor: &User) -> Result<Vec<Complaint>, Error> {
        authz::require_department_head(actor)?;
        let department = authz::own_department(actor)?;
        self.complaints
            .list_by_department(department)
            .await
            .map_err(map_complaint_persistence_error)
    }

    async fn admin_set_status(
        &self,
        actor: &User,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, Error> {
        authz::require_admin(actor)?;
        self.apply_or_not_found(
            id,
            TriageUpdate {
                status: Some(status),
                department: None,
            },
        )
        .await
    }

    async fn admin_assign_department(
        &self,
        actor: &User,
        id: ComplaintId,
        department: DepartmentId,
    ) -> Result<Complaint, Error> {
        authz::require_admin(actor)?;
        // Assignment means triage has begun: the status moves to processing
        // in the same write, even for previously resolved or rejected
        // tickets.
        self.apply_or_not_found(
            id,
            TriageUpdate {
                status: Some(ComplaintStatus::Processing),
                department: Some(department),
            },
        )
        .await
    }

    async fn desk_set_status(
        &self,
        actor: &User,
        id: ComplaintId,
        status: DeskStatus,
    ) -> Result<Complaint, Error> {
        authz::require_department_head(actor)?;
        let department = authz::own_department(actor)?;

        let complaint = self
            .complaints
            .find_by_id(id)
            .await
            .map_err(map_complaint_persistence_error)?
            .ok_or_else(|| Error::not_found("complaint not found"))?;
        if complaint.department_id() != Some(department) {
            return Err(Error::forbidden("complaint does not belong to your department"));
        }

        self.apply_or_not_found(
            id,
            TriageUpdate {
                status: Some(status.into_status()),
                department: None,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Transition-rule coverage over an in-memory ledger stub.
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::complaint::ComplaintKind;
    use crate::domain::error::ErrorCode;
    use crate::domain::user::{Roles, UserId};
    use rstest::rstest;

    struct StubLedger {
        complaints: Mutex<Vec<Complaint>>,
        failure: Mutex<Option<ComplaintPersistenceError>>,
    }

    impl StubLedger {
        fn new(complaints: Vec<Complaint>) -> Self {
            Self {
                complaints: Mutex::new(complaints),
                failure: Mutex::new(None),
            }
        }

        fn set_failure(&self, failure: ComplaintPersistenceError) {
            *self.failure.lock().expect("failure lock") = Some(failure);
        }

        fn check_failure(&self) -> Result<(), ComplaintPersistenceError> {
            self.failure
                .lock()
                .expect("failure lock")
                .clone()
                .map_or(Ok(()), Err)
        }
    }

    #[async_trait]
    impl ComplaintRepository for StubLedger {
        async fn insert(
            &self,
            owner: UserId,
            complaint: &NewComplaint,
        ) -> Result<Complaint, ComplaintPersistenceError> {
            self.check_failure()?;
            let mut complaints = self.complaints.lock().expect("ledger lock");
            let id = ComplaintId::new(i32::try_from(complaints.len()).unwrap_or(0) + 1);
            let created = Complaint::new(
                id,
                owner,
                complaint.kind(),
                complaint.description().to_owned(),
                ComplaintStatus::Pending,
                None,
                fixed_now(),
            );
            complaints.push(created.clone());
            Ok(created)
        }

        async fn find_by_id(
            &self,
            id: ComplaintId,
        ) -> Result<Option<Complaint>, ComplaintPersistenceError> {
            self.check_failure()?;
            let complaints = self.complaints.lock().expect("ledger lock");
            Ok(complaints.iter().find(|c| c.id() == id).cloned())
        }

        async fn list_by_owner(
            &self,
            owner: UserId,
        ) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
            self.check_failure()?;
            let complaints = self.complaints.lock().expect("ledger lock");
            Ok(complaints
                .iter()
                .filter(|c| c.user_id() == owner)
                .cloned()
                .collect())
        }

        async fn list_by_department(
            &self,
            department: DepartmentId,
        ) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
            self.check_failure()?;
            let complaints = self.complaints.lock().expect("ledger lock");
            Ok(complaints
                .iter()
                .filter(|c| c.department_id() == Some(department))
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintPersistenceError> {
            self.check_failure()?;
            Ok(self.complaints.lock().expect("ledger lock").clone())
        }

        async fn apply(
            &self,
            id: ComplaintId,
            update: TriageUpdate,
        ) -> Result<Option<Complaint>, ComplaintPersistenceError> {
            self.check_failure()?;
            let mut complaints = self.complaints.lock().expect("ledger lock");
            let Some(found) = complaints.iter_mut().find(|c| c.id() == id) else {
                return Ok(None);
            };
            let updated = Complaint::new(
                found.id(),
                found.user_id(),
                found.kind(),
                found.description().to_owned(),
                update.status.unwrap_or(found.status()),
                update.department.or(found.department_id()),
                found.created_at(),
            );
            *found = updated.clone();
            Ok(Some(updated))
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    fn complaint(id: i32, status: ComplaintStatus, department: Option<i32>) -> Complaint {
        Complaint::new(
            ComplaintId::new(id),
            UserId::new(10),
            ComplaintKind::Query,
            "Necesito ayuda con mi pago".to_owned(),
            status,
            department.map(DepartmentId::new),
            fixed_now(),
        )
    }

    fn citizen() -> User {
        user(10, Roles::default())
    }

    fn admin() -> User {
        user(
            1,
            Roles {
                is_admin: true,
                ..Roles::default()
            },
        )
    }

    fn head_of(department: i32) -> User {
        user(
            2,
            Roles {
                is_department_head: true,
                department_id: Some(DepartmentId::new(department)),
                ..Roles::default()
            },
        )
    }

    fn user(id: i32, roles: Roles) -> User {
        User::new(
            UserId::new(id),
            format!("user{id}"),
            "Test Person".to_owned(),
            "person@example.org".to_owned(),
            roles,
        )
    }

    fn service(complaints: Vec<Complaint>) -> (TriageService, Arc<StubLedger>) {
        let ledger = Arc::new(StubLedger::new(complaints));
        (TriageService::new(ledger.clone()), ledger)
    }

    #[tokio::test]
    async fn submission_starts_pending_and_unassigned() {
        let (service, _) = service(Vec::new());
        let payload =
            NewComplaint::try_from_parts("QUERY", "Necesito ayuda con mi pago").expect("valid");

        let created = service
            .submit(&citizen(), &payload)
            .await
            .expect("submission succeeds");

        assert_eq!(created.status(), ComplaintStatus::Pending);
        assert_eq!(created.department_id(), None);
        assert_eq!(created.user_id(), citizen().id());
    }

    #[tokio::test]
    async fn admin_moves_complaints_into_any_status() {
        let (service, _) = service(vec![complaint(1, ComplaintStatus::Resolved, Some(3))]);

        for status in [
            ComplaintStatus::Pending,
            ComplaintStatus::Processing,
            ComplaintStatus::Resolved,
            ComplaintStatus::Rejected,
        ] {
            let updated = service
                .admin_set_status(&admin(), ComplaintId::new(1), status)
                .await
                .expect("admin transitions are unconstrained");
            assert_eq!(updated.status(), status);
        }
    }

    #[tokio::test]
    async fn admin_gate_rejects_other_actors() {
        let (service, _) = service(vec![complaint(1, ComplaintStatus::Pending, None)]);

        for actor in [citizen(), head_of(3)] {
            let err = service
                .admin_set_status(&actor, ComplaintId::new(1), ComplaintStatus::Processing)
                .await
                .expect_err("only admins set arbitrary status");
            assert_eq!(err.code(), ErrorCode::Forbidden);
        }
    }

    #[tokio::test]
    async fn assignment_forces_processing_even_from_resolved() {
        let (service, _) = service(vec![complaint(1, ComplaintStatus::Resolved, Some(2))]);

        let updated = service
            .admin_assign_department(&admin(), ComplaintId::new(1), DepartmentId::new(3))
            .await
            .expect("assignment succeeds");

        // Reopening a closed ticket on reassignment is deliberate: the new
        // department starts its own triage pass.
        assert_eq!(updated.status(), ComplaintStatus::Processing);
        assert_eq!(updated.department_id(), Some(DepartmentId::new(3)));
    }

    #[tokio::test]
    async fn desk_updates_own_department_complaint() {
        let (service, _) = service(vec![complaint(1, ComplaintStatus::Processing, Some(3))]);

        let updated = service
            .desk_set_status(&head_of(3), ComplaintId::new(1), DeskStatus::Resolved)
            .await
            .expect("own-department update succeeds");
        assert_eq!(updated.status(), ComplaintStatus::Resolved);
    }

    #[tokio::test]
    async fn desk_update_outside_own_department_is_forbidden() {
        let (service, ledger) = service(vec![complaint(1, ComplaintStatus::Processing, Some(3))]);

        let err = service
            .desk_set_status(&head_of(4), ComplaintId::new(1), DeskStatus::Resolved)
            .await
            .expect_err("cross-department update must fail");

        assert_eq!(err.code(), ErrorCode::Forbidden);
        // Never a silent no-op: the record is untouched.
        let unchanged = ledger
            .complaints
            .lock()
            .expect("ledger lock")
            .first()
            .cloned()
            .expect("complaint present");
        assert_eq!(unchanged.status(), ComplaintStatus::Processing);
    }

    #[tokio::test]
    async fn desk_update_for_unassigned_complaint_is_forbidden() {
        let (service, _) = service(vec![complaint(1, ComplaintStatus::Pending, None)]);

        let err = service
            .desk_set_status(&head_of(3), ComplaintId::new(1), DeskStatus::Processing)
            .await
            .expect_err("unassigned complaints belong to no desk");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn desk_update_for_missing_complaint_is_not_found() {
        let (service, _) = service(Vec::new());

        let err = service
            .desk_set_status(&head_of(3), ComplaintId::new(99), DeskStatus::Resolved)
            .await
            .expect_err("missing record");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn desk_without_department_fails_validation() {
        let (service, _) = service(vec![complaint(1, ComplaintStatus::Processing, Some(3))]);
        let head = user(
            5,
            Roles {
                is_department_head: true,
                ..Roles::default()
            },
        );

        let err = service
            .desk_set_status(&head, ComplaintId::new(1), DeskStatus::Resolved)
            .await
            .expect_err("head without department");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn admin_status_update_for_missing_complaint_is_not_found() {
        let (service, _) = service(Vec::new());

        let err = service
            .admin_set_status(&admin(), ComplaintId::new(42), ComplaintStatus::Rejected)
            .await
            .expect_err("missing record");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn department_listing_is_scoped_to_the_actor() {
        let (service, _) = service(vec![
            complaint(1, ComplaintStatus::Processing, Some(3)),
            complaint(2, ComplaintStatus::Processing, Some(4)),
            complaint(3, ComplaintStatus::Pending, None),
        ]);

        let listed = service
            .department_complaints(&head_of(3))
            .await
            .expect("listing succeeds");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(Complaint::id), Some(ComplaintId::new(1)));
    }

    #[tokio::test]
    async fn all_complaints_requires_the_admin_capability() {
        let (service, _) = service(vec![complaint(1, ComplaintStatus::Pending, None)]);

        let err = service
            .all_complaints(&citizen())
            .await
            .expect_err("citizens cannot read the full ledger");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(
            service
                .all_complaints(&admin())
                .await
                .expect("admins read the full ledger")
                .len(),
            1
        );
    }

    #[rstest]
    #[case(ComplaintPersistenceError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
    #[case(ComplaintPersistenceError::query("relation missing"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn persistence_failures_map_onto_the_error_taxonomy(
        #[case] failure: ComplaintPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let (service, ledger) = service(Vec::new());
        ledger.set_failure(failure);

        let err = service
            .own_complaints(&citizen())
            .await
            .expect_err("failure propagates");
        assert_eq!(err.code(), expected);
    }
}
