//! Shared helpers for Diesel adapters: error message extraction, store fault
//! classification, and per-query timeouts.

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Fragments the attendance stored function uses when it rejects a DNI.
const MISSING_PERSON_FRAGMENTS: [&str; 2] = ["does not exist", "no existe"];

/// Leading text of PostgreSQL's own missing-object errors (English and
/// Spanish server locales). These are schema faults, not unknown people.
const SCHEMA_OBJECT_PREFIXES: [&str; 12] = [
    "function ",
    "relation ",
    "column ",
    "schema ",
    "type ",
    "operator ",
    "no existe la función",
    "no existe la relación",
    "no existe la columna",
    "no existe el esquema",
    "no existe el tipo",
    "no existe el operador",
];

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Extract a readable message from a Diesel error and emit debug context.
pub fn map_diesel_error_message(error: &DieselError, operation: &str) -> String {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
            info.message().to_owned()
        }
        other => {
            let message = other.to_string();
            debug!(error_message = %message, %operation, "diesel operation failed");
            message
        }
    }
}

/// Whether a Diesel error indicates a lost or unusable connection.
pub fn is_connection_error(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
            | DieselError::BrokenTransactionManager
    )
}

/// Return the store's diagnostic when a raised exception reports an unknown
/// person.
///
/// The stored function signals the condition only through its exception
/// text, so this is the single place where message content is inspected.
/// Missing functions, relations and other schema objects are excluded.
pub fn missing_person_diagnostic(error: &DieselError) -> Option<String> {
    let DieselError::DatabaseError(_, info) = error else {
        return None;
    };
    let message = info.message();
    let lower = message.trim_start().to_lowercase();
    if SCHEMA_OBJECT_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return None;
    }
    MISSING_PERSON_FRAGMENTS
        .iter()
        .any(|fragment| lower.contains(fragment))
        .then(|| message.to_owned())
}

/// Outcome of a store call bounded by a timeout.
#[derive(Debug)]
pub enum Bounded<T, E> {
    /// The call finished, successfully or not.
    Finished(Result<T, E>),
    /// The call exceeded its budget.
    TimedOut(Duration),
}

/// Run `fut` with an upper bound of `limit`.
pub async fn bounded<T, E, F>(limit: Duration, fut: F) -> Bounded<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => Bounded::Finished(result),
        Err(_) => Bounded::TimedOut(limit),
    }
}

/// Human-readable message for an elapsed timeout.
pub fn timeout_message(limit: Duration, operation: &str) -> String {
    format!("{operation} timed out after {}ms", limit.as_millis())
}
