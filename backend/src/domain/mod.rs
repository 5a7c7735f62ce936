//! Domain primitives, ports, and services.
//!
//! Purpose: define the strongly typed attendance model used by the HTTP and
//! persistence adapters. Types are immutable once built and validate their
//! invariants on construction.
//!
//! Public surface:
//! - Dni: validated eight-character identity number.
//! - Person: roster entry resolved from a DNI.
//! - AttendanceRecord / AttendanceKind: stored attendance events.
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - AttendanceService: implementation of the driving ports.

pub mod attendance;
pub mod attendance_service;
pub mod dni;
pub mod error;
pub mod person;
pub mod ports;

pub use self::attendance::{AttendanceKind, AttendanceRecord, UnknownAttendanceKind};
pub use self::attendance_service::{AttendanceService, DNI_NOT_REGISTERED_MESSAGE};
pub use self::dni::{DNI_LENGTH, Dni, DniValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::person::Person;
