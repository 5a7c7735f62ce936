//! Driving port for registering attendance.

use async_trait::async_trait;

use crate::domain::{AttendanceRecord, Dni, Error};

/// Use-case port for recording an entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceCommand: Send + Sync {
    /// Record one entry for `dni` and return the stored record.
    async fn register(&self, dni: &Dni) -> Result<AttendanceRecord, Error>;
}
