//! Driven port for reading the roster of eligible people.

use async_trait::async_trait;

use crate::domain::{Dni, Person};

use super::define_port_error;

define_port_error! {
    /// Errors raised by roster repository adapters.
    pub enum RosterPersistenceError {
        /// Store connection could not be established or timed out.
        Connection { message: String } => "roster connection failed: {message}",
        /// Lookup query failed during execution.
        Query { message: String } => "roster query failed: {message}",
    }
}

/// Port for resolving a DNI to a roster entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Fetch the person registered under `dni`, if any.
    ///
    /// A missing person is `Ok(None)`, never an error.
    async fn find_person(&self, dni: &Dni) -> Result<Option<Person>, RosterPersistenceError>;
}
