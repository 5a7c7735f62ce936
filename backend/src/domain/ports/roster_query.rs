//! Driving port for validating a DNI against the roster.
//!
//! Inbound adapters call this port; production wires it to
//! [`crate::domain::AttendanceService`].

use async_trait::async_trait;

use crate::domain::{Dni, Error, Person};

/// Use-case port for identity validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterQuery: Send + Sync {
    /// Resolve `dni` to its roster entry.
    ///
    /// Returns an [`crate::domain::ErrorCode::NotFound`] error when the DNI is
    /// not registered.
    async fn validate(&self, dni: &Dni) -> Result<Person, Error>;
}
