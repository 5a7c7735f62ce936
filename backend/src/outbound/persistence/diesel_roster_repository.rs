//! PostgreSQL-backed roster lookup through the `validar_hermano` function.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RosterPersistenceError, RosterRepository};
use crate::domain::{Dni, Person};

use super::diesel_helpers::{
    Bounded, bounded, is_connection_error, map_diesel_error_message, map_pool_error_message,
    timeout_message,
};
use super::models::RosterRow;
use super::pool::{DbPool, PoolError};

const LOOKUP_SQL: &str = r#"
SELECT nombre_hermano::text AS nombre_hermano,
       dni_hermano::text AS dni_hermano,
       nombre_grupo::text AS nombre_grupo
FROM validar_hermano($1)
"#;

const OPERATION: &str = "roster lookup";

/// Diesel-backed implementation of [`RosterRepository`].
#[derive(Clone)]
pub struct DieselRosterRepository {
    pool: DbPool,
}

impl DieselRosterRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RosterPersistenceError {
    RosterPersistenceError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error) -> RosterPersistenceError {
    let message = map_diesel_error_message(error, OPERATION);
    if is_connection_error(error) {
        RosterPersistenceError::connection(message)
    } else {
        RosterPersistenceError::query(message)
    }
}

fn person_from_row(row: RosterRow) -> Result<Person, RosterPersistenceError> {
    let RosterRow { name, dni, group } = row;
    let dni = Dni::new(&dni)
        .map_err(|err| RosterPersistenceError::query(format!("roster returned invalid DNI: {err}")))?;
    Ok(Person::new(dni, name, group))
}

#[async_trait]
impl RosterRepository for DieselRosterRepository {
    async fn find_person(&self, dni: &Dni) -> Result<Option<Person>, RosterPersistenceError> {
        let limit = self.pool.query_timeout();
        let query = async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            sql_query(LOOKUP_SQL)
                .bind::<Text, _>(dni.as_ref())
                .load::<RosterRow>(&mut conn)
                .await
                .map_err(|err| map_diesel_error(&err))
        };

        let rows = match bounded(limit, query).await {
            Bounded::Finished(result) => result?,
            Bounded::TimedOut(limit) => {
                return Err(RosterPersistenceError::connection(timeout_message(
                    limit, OPERATION,
                )));
            }
        };

        rows.into_iter().next().map(person_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(dni: &str, group: Option<&str>) -> RosterRow {
        RosterRow {
            name: "Ana García".to_owned(),
            dni: dni.to_owned(),
            group: group.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(Some("Cuadrilla San Juan"))]
    #[case(None)]
    fn rows_map_to_people(#[case] group: Option<&str>) {
        let person = person_from_row(row("12345678", group)).expect("valid row");

        assert_eq!(person.dni().as_ref(), "12345678");
        assert_eq!(person.name(), "Ana García");
        assert_eq!(person.group(), group);
    }

    #[rstest]
    fn malformed_row_dni_is_a_query_error() {
        let err = person_from_row(row("1234", None)).expect_err("invalid dni");
        assert!(matches!(err, RosterPersistenceError::Query { .. }));
    }
}
