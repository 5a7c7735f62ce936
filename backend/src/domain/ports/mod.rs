//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod attendance_command;
mod attendance_repository;
mod roster_query;
mod roster_repository;
mod store_health;

pub use attendance_command::AttendanceCommand;
#[cfg(test)]
pub use attendance_command::MockAttendanceCommand;
#[cfg(test)]
pub use attendance_repository::MockAttendanceRepository;
pub use attendance_repository::{AttendancePersistenceError, AttendanceRepository};
#[cfg(test)]
pub use roster_query::MockRosterQuery;
pub use roster_query::RosterQuery;
#[cfg(test)]
pub use roster_repository::MockRosterRepository;
pub use roster_repository::{RosterPersistenceError, RosterRepository};
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::{StoreHealth, StoreHealthError};
