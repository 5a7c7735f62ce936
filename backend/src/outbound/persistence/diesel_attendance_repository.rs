//! PostgreSQL-backed attendance recording through the
//! `registrar_asistencia_entrada` function.
//!
//! The function validates the DNI itself and raises an exception for unknown
//! people; that exception becomes [`AttendancePersistenceError::PersonNotFound`].

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AttendancePersistenceError, AttendanceRepository};
use crate::domain::{AttendanceKind, AttendanceRecord, Dni};

use super::diesel_helpers::{
    Bounded, bounded, is_connection_error, map_diesel_error_message, map_pool_error_message,
    missing_person_diagnostic, timeout_message,
};
use super::models::AttendanceRow;
use super::pool::{DbPool, PoolError};

const RECORD_SQL: &str = r#"
SELECT registro_id::bigint AS registro_id,
       hermano_nombre::text AS hermano_nombre,
       fecha_registro::timestamptz AS fecha_registro,
       tipo_registro::text AS tipo_registro
FROM registrar_asistencia_entrada($1)
"#;

const OPERATION: &str = "attendance insert";

/// Diesel-backed implementation of [`AttendanceRepository`].
#[derive(Clone)]
pub struct DieselAttendanceRepository {
    pool: DbPool,
}

impl DieselAttendanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AttendancePersistenceError {
    AttendancePersistenceError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error) -> AttendancePersistenceError {
    if let Some(diagnostic) = missing_person_diagnostic(error) {
        return AttendancePersistenceError::person_not_found(diagnostic);
    }
    let message = map_diesel_error_message(error, OPERATION);
    if is_connection_error(error) {
        AttendancePersistenceError::connection(message)
    } else {
        AttendancePersistenceError::query(message)
    }
}

fn record_from_row(dni: &Dni, row: AttendanceRow) -> Result<AttendanceRecord, AttendancePersistenceError> {
    let AttendanceRow {
        id,
        name,
        recorded_at,
        kind,
    } = row;
    let kind = kind
        .parse::<AttendanceKind>()
        .map_err(|err| AttendancePersistenceError::query(err.to_string()))?;
    Ok(AttendanceRecord {
        id,
        dni: dni.clone(),
        name,
        recorded_at,
        kind,
    })
}

#[async_trait]
impl AttendanceRepository for DieselAttendanceRepository {
    async fn record_entry(&self, dni: &Dni) -> Result<AttendanceRecord, AttendancePersistenceError> {
        let limit = self.pool.query_timeout();
        let insert = async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            sql_query(RECORD_SQL)
                .bind::<Text, _>(dni.as_ref())
                .load::<AttendanceRow>(&mut conn)
                .await
                .map_err(|err| map_diesel_error(&err))
        };

        let rows = match bounded(limit, insert).await {
            Bounded::Finished(result) => result?,
            Bounded::TimedOut(limit) => {
                return Err(AttendancePersistenceError::connection(timeout_message(
                    limit, OPERATION,
                )));
            }
        };

        let row = rows.into_iter().next().ok_or_else(|| {
            AttendancePersistenceError::query("attendance function returned no row")
        })?;
        record_from_row(dni, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};
    use rstest::rstest;

    struct RaisedMessage(&'static str);

    impl DatabaseErrorInformation for RaisedMessage {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn raised(message: &'static str) -> diesel::result::Error {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::Unknown, Box::new(RaisedMessage(message)))
    }

    fn row(kind: &str) -> AttendanceRow {
        AttendanceRow {
            id: 41,
            name: "Ana García".to_owned(),
            recorded_at: Utc
                .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
            kind: kind.to_owned(),
        }
    }

    #[rstest]
    fn row_maps_to_record_with_requested_dni() {
        let dni = Dni::new("12345678").expect("valid dni");
        let record = record_from_row(&dni, row("ENTRADA")).expect("valid row");

        assert_eq!(record.id, 41);
        assert_eq!(record.dni, dni);
        assert_eq!(record.name, "Ana García");
        assert_eq!(record.kind, AttendanceKind::Entry);
    }

    #[rstest]
    fn unknown_kind_is_a_query_error() {
        let dni = Dni::new("12345678").expect("valid dni");
        let err = record_from_row(&dni, row("PAUSA")).expect_err("unknown kind");
        assert!(matches!(err, AttendancePersistenceError::Query { .. }));
    }

    #[rstest]
    fn not_found_result_is_a_query_error() {
        let err = map_diesel_error(&diesel::result::Error::NotFound);
        assert!(matches!(err, AttendancePersistenceError::Query { .. }));
    }

    #[rstest]
    fn unknown_person_exception_is_person_not_found() {
        let err = map_diesel_error(&raised("El hermano con DNI 00000000 no existe."));
        assert!(matches!(err, AttendancePersistenceError::PersonNotFound { .. }));
    }

    #[rstest]
    #[case("function registrar_asistencia_entrada(text) does not exist")]
    #[case("relation \"asistencias\" does not exist")]
    fn missing_schema_object_is_a_query_error(#[case] message: &'static str) {
        let err = map_diesel_error(&raised(message));
        assert!(matches!(err, AttendancePersistenceError::Query { .. }));
        assert!(err.to_string().contains(message));
    }
}
