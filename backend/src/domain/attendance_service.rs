//! Attendance domain service.
//!
//! Implements the [`RosterQuery`] and [`AttendanceCommand`] driving ports on
//! top of the roster and attendance repositories, translating persistence
//! failures into transport-agnostic [`Error`] values.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AttendanceCommand, AttendancePersistenceError, AttendanceRepository, RosterPersistenceError,
    RosterQuery, RosterRepository,
};
use crate::domain::{AttendanceRecord, Dni, Error, Person};

/// Client-facing message for a DNI missing from the roster.
pub const DNI_NOT_REGISTERED_MESSAGE: &str = "DNI de Hermano no registrado.";

fn internal_with_diagnostic(summary: &str, diagnostic: String) -> Error {
    Error::internal(format!("{summary}: {diagnostic}")).with_details(Value::String(diagnostic))
}

fn map_roster_error(err: RosterPersistenceError) -> Error {
    error!(error = %err, "roster lookup failed");
    let diagnostic = err.to_string();
    internal_with_diagnostic("roster lookup failed", diagnostic)
}

fn map_attendance_error(err: AttendancePersistenceError) -> Error {
    match err {
        AttendancePersistenceError::PersonNotFound { message } => {
            debug!(%message, "attendance store rejected unknown DNI");
            Error::not_found(message)
        }
        other => {
            error!(error = %other, "attendance registration failed");
            let diagnostic = other.to_string();
            internal_with_diagnostic("attendance registration failed", diagnostic)
        }
    }
}

/// Service validating DNIs and recording entries.
pub struct AttendanceService<R: ?Sized, A: ?Sized> {
    roster: Arc<R>,
    attendance: Arc<A>,
}

impl<R: ?Sized, A: ?Sized> Clone for AttendanceService<R, A> {
    fn clone(&self) -> Self {
        Self {
            roster: Arc::clone(&self.roster),
            attendance: Arc::clone(&self.attendance),
        }
    }
}

impl<R: ?Sized, A: ?Sized> AttendanceService<R, A> {
    /// Create a service over the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use attendance_backend::domain::AttendanceService;
    /// use attendance_backend::outbound::memory::InMemoryAttendanceStore;
    ///
    /// let store = Arc::new(InMemoryAttendanceStore::with_default_roster());
    /// let _service = AttendanceService::new(store.clone(), store);
    /// ```
    pub fn new(roster: Arc<R>, attendance: Arc<A>) -> Self {
        Self { roster, attendance }
    }
}

#[async_trait]
impl<R, A> RosterQuery for AttendanceService<R, A>
where
    R: RosterRepository + ?Sized,
    A: AttendanceRepository + ?Sized,
{
    async fn validate(&self, dni: &Dni) -> Result<Person, Error> {
        match self.roster.find_person(dni).await.map_err(map_roster_error)? {
            Some(person) => Ok(person),
            None => {
                debug!("DNI not present on roster");
                Err(Error::not_found(DNI_NOT_REGISTERED_MESSAGE))
            }
        }
    }
}

#[async_trait]
impl<R, A> AttendanceCommand for AttendanceService<R, A>
where
    R: RosterRepository + ?Sized,
    A: AttendanceRepository + ?Sized,
{
    async fn register(&self, dni: &Dni) -> Result<AttendanceRecord, Error> {
        let record = self
            .attendance
            .record_entry(dni)
            .await
            .map_err(map_attendance_error)?;
        info!(record_id = record.id, kind = %record.kind, "attendance recorded");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAttendanceRepository, MockRosterRepository};
    use crate::domain::{AttendanceKind, ErrorCode};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn dni() -> Dni {
        Dni::new("12345678").expect("fixture dni")
    }

    fn service(
        roster: MockRosterRepository,
        attendance: MockAttendanceRepository,
    ) -> AttendanceService<MockRosterRepository, MockAttendanceRepository> {
        AttendanceService::new(Arc::new(roster), Arc::new(attendance))
    }

    fn record(dni: &Dni, id: i64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            dni: dni.clone(),
            name: "Ana García".to_owned(),
            recorded_at: Utc
                .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
            kind: AttendanceKind::Entry,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn validate_returns_roster_entry(dni: Dni) {
        let person = Person::new(dni.clone(), "Ana García", Some("Cuadrilla 1".to_owned()));
        let expected = person.clone();
        let mut roster = MockRosterRepository::new();
        roster
            .expect_find_person()
            .times(1)
            .return_once(move |_| Ok(Some(person)));

        let found = service(roster, MockAttendanceRepository::new())
            .validate(&dni)
            .await
            .expect("person found");

        assert_eq!(found, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn validate_maps_missing_person_to_not_found(dni: Dni) {
        let mut roster = MockRosterRepository::new();
        roster.expect_find_person().times(1).return_once(|_| Ok(None));

        let err = service(roster, MockAttendanceRepository::new())
            .validate(&dni)
            .await
            .expect_err("missing person");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), DNI_NOT_REGISTERED_MESSAGE);
    }

    #[rstest]
    #[case(RosterPersistenceError::connection("timed out"), "timed out")]
    #[case(RosterPersistenceError::query("syntax error"), "syntax error")]
    #[tokio::test]
    async fn validate_maps_store_faults_to_internal(
        dni: Dni,
        #[case] failure: RosterPersistenceError,
        #[case] fragment: &str,
    ) {
        let mut roster = MockRosterRepository::new();
        roster
            .expect_find_person()
            .times(1)
            .return_once(move |_| Err(failure));

        let err = service(roster, MockAttendanceRepository::new())
            .validate(&dni)
            .await
            .expect_err("store fault");

        assert_eq!(err.code(), ErrorCode::InternalError);
        let details = err
            .details()
            .and_then(Value::as_str)
            .expect("diagnostic details");
        assert!(details.contains(fragment));
    }

    #[rstest]
    #[tokio::test]
    async fn register_returns_store_record(dni: Dni) {
        let stored = record(&dni, 7);
        let expected = stored.clone();
        let mut attendance = MockAttendanceRepository::new();
        attendance
            .expect_record_entry()
            .times(1)
            .return_once(move |_| Ok(stored));

        let recorded = service(MockRosterRepository::new(), attendance)
            .register(&dni)
            .await
            .expect("record created");

        assert_eq!(recorded, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn register_keeps_store_diagnostic_for_unknown_person(dni: Dni) {
        let mut attendance = MockAttendanceRepository::new();
        attendance.expect_record_entry().times(1).return_once(|_| {
            Err(AttendancePersistenceError::person_not_found(
                "El hermano con DNI 12345678 no existe.",
            ))
        });

        let err = service(MockRosterRepository::new(), attendance)
            .register(&dni)
            .await
            .expect_err("unknown person");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "El hermano con DNI 12345678 no existe.");
    }

    #[rstest]
    #[tokio::test]
    async fn register_maps_query_failure_to_internal(dni: Dni) {
        let mut attendance = MockAttendanceRepository::new();
        attendance
            .expect_record_entry()
            .times(1)
            .return_once(|_| Err(AttendancePersistenceError::query("deadlock detected")));

        let err = service(MockRosterRepository::new(), attendance)
            .register(&dni)
            .await
            .expect_err("query failure");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().contains("deadlock detected"));
    }
}
