//! Connection-string resolution from an ordered list of environment
//! variables.

use std::fmt;

use mockable::Env;

/// Environment variables consulted for the connection string, in order of
/// precedence.
pub const DATABASE_URL_CANDIDATES: [&str; 2] = ["DATABASE_URL", "POSTGRES_URL"];

/// Connection string together with the variable it came from.
///
/// `Debug` never prints the URL itself because it usually embeds
/// credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseUrl {
    url: String,
    source: &'static str,
}

impl DatabaseUrl {
    /// Connection string as supplied.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Name of the environment variable that supplied the value.
    pub fn source(&self) -> &'static str {
        self.source
    }
}

impl fmt::Debug for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseUrl")
            .field("url", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve the connection string from `candidates`, first non-blank wins.
///
/// # Examples
///
/// ```rust
/// use attendance_backend::settings::{DATABASE_URL_CANDIDATES, resolve_database_url};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "POSTGRES_URL" => Some("postgres://localhost/asistencia".to_owned()),
///     _ => None,
/// });
///
/// let url = resolve_database_url(&env, &DATABASE_URL_CANDIDATES).expect("resolved");
/// assert_eq!(url.source(), "POSTGRES_URL");
/// ```
pub fn resolve_database_url<E: Env>(env: &E, candidates: &[&'static str]) -> Option<DatabaseUrl> {
    candidates.iter().find_map(|&name| {
        env.string(name)
            .filter(|value| !value.trim().is_empty())
            .map(|value| DatabaseUrl {
                url: value.trim().to_owned(),
                source: name,
            })
    })
}
