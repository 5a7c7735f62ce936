//! National identity number used as the roster lookup key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of characters every DNI must contain.
pub const DNI_LENGTH: usize = 8;

/// Validation errors returned by [`Dni::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DniValidationError {
    /// The DNI was not exactly [`DNI_LENGTH`] characters long.
    #[error("DNI must be exactly {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Validated DNI.
///
/// Length is counted in characters rather than bytes and the input is kept
/// verbatim; surrounding whitespace counts towards the length.
///
/// # Examples
/// ```
/// use attendance_backend::domain::Dni;
///
/// let dni = Dni::new("12345678").expect("eight characters");
/// assert_eq!(dni.as_ref(), "12345678");
/// assert!(Dni::new("123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dni(String);

impl Dni {
    /// Validate and construct a [`Dni`] from borrowed input.
    pub fn new(dni: impl AsRef<str>) -> Result<Self, DniValidationError> {
        Self::from_owned(dni.as_ref().to_owned())
    }

    fn from_owned(dni: String) -> Result<Self, DniValidationError> {
        let actual = dni.chars().count();
        if actual != DNI_LENGTH {
            return Err(DniValidationError::InvalidLength {
                expected: DNI_LENGTH,
                actual,
            });
        }
        Ok(Self(dni))
    }
}

impl AsRef<str> for Dni {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Dni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Dni> for String {
    fn from(value: Dni) -> Self {
        value.0
    }
}

impl TryFrom<String> for Dni {
    type Error = DniValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}
