//! Attendance records produced by successful registrations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Dni;

/// Kind of attendance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceKind {
    /// Arrival. The only kind the gateway currently records.
    #[serde(rename = "ENTRADA")]
    Entry,
}

impl AttendanceKind {
    /// Wire representation shared with the attendance store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "ENTRADA",
        }
    }
}

impl fmt::Display for AttendanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when the store reports a kind the gateway does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attendance kind: {0}")]
pub struct UnknownAttendanceKind(pub String);

impl FromStr for AttendanceKind {
    type Err = UnknownAttendanceKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "ENTRADA" => Ok(Self::Entry),
            other => Err(UnknownAttendanceKind(other.to_owned())),
        }
    }
}

/// One attendance event.
///
/// Created exactly once per successful registration; never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Identity number the record belongs to.
    pub dni: Dni,
    /// Name of the person as reported by the store.
    pub name: String,
    /// Moment the store accepted the record.
    pub recorded_at: DateTime<Utc>,
    /// Event kind.
    pub kind: AttendanceKind,
}
