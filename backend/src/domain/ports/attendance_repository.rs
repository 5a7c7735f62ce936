//! Driven port for appending attendance records.

use async_trait::async_trait;

use crate::domain::{AttendanceRecord, Dni};

use super::define_port_error;

define_port_error! {
    /// Errors raised by attendance repository adapters.
    pub enum AttendancePersistenceError {
        /// The store refused the record because the DNI is not on the roster.
        ///
        /// `message` is the store's own diagnostic and is safe to show to
        /// clients.
        PersonNotFound { message: String } => "{message}",
        /// Store connection could not be established or timed out.
        Connection { message: String } => "attendance connection failed: {message}",
        /// Insert failed during execution or returned an unusable row.
        Query { message: String } => "attendance query failed: {message}",
    }
}

/// Port for recording attendance entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Create one entry record for `dni`.
    ///
    /// Implementations check roster membership and return
    /// [`AttendancePersistenceError::PersonNotFound`] without writing when the
    /// DNI is unknown. Repeated calls create repeated records.
    async fn record_entry(&self, dni: &Dni) -> Result<AttendanceRecord, AttendancePersistenceError>;
}
