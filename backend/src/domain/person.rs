//! Roster entry for a person allowed to register attendance.

use serde::{Deserialize, Serialize};

use super::Dni;

/// Person listed on the roster.
///
/// Reference data owned by the roster store; the gateway only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    dni: Dni,
    name: String,
    group: Option<String>,
}

impl Person {
    /// Build a person from its roster fields.
    pub fn new(dni: Dni, name: impl Into<String>, group: Option<String>) -> Self {
        Self {
            dni,
            name: name.into(),
            group,
        }
    }

    /// Identity number.
    pub fn dni(&self) -> &Dni {
        &self.dni
    }

    /// Full name as stored on the roster.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Group the person belongs to, when the roster tracks one.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}
