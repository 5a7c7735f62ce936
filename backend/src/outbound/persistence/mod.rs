//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the roster, attendance and store-health ports
//! backed by PostgreSQL through `diesel-async` with `bb8` pooling.
//!
//! The database owns validation and insertion: adapters call the
//! `validar_hermano` and `registrar_asistencia_entrada` stored functions and
//! only translate rows and failures into domain types.
//!
//! # Example
//!
//! ```no_run
//! use attendance_backend::outbound::persistence::{DbPool, DieselRosterRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/asistencia")).await?;
//! let _roster = DieselRosterRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_attendance_repository;
pub(crate) mod diesel_helpers;
mod diesel_roster_repository;
mod diesel_store_health;
mod models;
mod pool;

pub use diesel_attendance_repository::DieselAttendanceRepository;
pub use diesel_roster_repository::DieselRosterRepository;
pub use diesel_store_health::DieselStoreHealth;
pub use pool::{DbPool, PoolConfig, PoolError};
