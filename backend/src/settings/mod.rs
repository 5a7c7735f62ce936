//! Gateway configuration.
//!
//! Process settings are loaded through OrthoConfig (`ATTENDANCE_*`
//! environment variables, CLI flags, config files). The connection string is
//! resolved separately from [`DATABASE_URL_CANDIDATES`]. Both are combined
//! once at startup into a [`GatewayConfig`]; any failure aborts startup.

mod database_url;

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

pub use database_url::{DATABASE_URL_CANDIDATES, DatabaseUrl, resolve_database_url};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Raw settings loaded via OrthoConfig.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ATTENDANCE")]
pub struct GatewaySettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Serve the built-in in-memory roster instead of PostgreSQL.
    #[ortho_config(default = false)]
    pub in_memory: bool,
    /// Include raw store diagnostics in 500 responses.
    #[ortho_config(default = false)]
    pub expose_error_details: bool,
    /// Upper bound for HTTP request reads, pool checkout, and each query.
    pub request_timeout_secs: Option<u64>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Comma-separated browser origins allowed by CORS. Unset, empty or `*`
    /// allows any origin.
    pub cors_origins: Option<String>,
}

impl GatewaySettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Configured timeout in seconds, falling back to 10.
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Configured pool size, falling back to 10.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Configured CORS origins with blanks removed. A `*` entry clears the
    /// list so every origin is allowed.
    pub fn cors_origins(&self) -> Vec<String> {
        let origins: Vec<String> = self
            .cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.iter().any(|origin| origin == "*") {
            Vec::new()
        } else {
            origins
        }
    }
}

/// Errors that prevent the gateway from starting.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// None of the connection-string variables held a value.
    #[error("no database connection string configured; set one of {}", DATABASE_URL_CANDIDATES.join(", "))]
    MissingDatabaseUrl,
    /// The host is not an IP address.
    #[error("invalid host '{value}'; expected an IP address")]
    InvalidHost { value: String },
    /// A timeout of zero would reject every request.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
    /// A pool without connections cannot serve queries.
    #[error("pool size must be at least one connection")]
    ZeroPoolSize,
    /// A CORS origin that is not an `http` or `https` URL.
    #[error("invalid CORS origin '{value}'; expected an http(s) origin")]
    InvalidCorsOrigin { value: String },
}

/// Backing store selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL reached through the resolved connection string.
    Postgres {
        /// Resolved connection string.
        database_url: DatabaseUrl,
        /// Maximum pooled connections.
        pool_max_size: u32,
    },
    /// Built-in roster with in-process attendance list.
    InMemory,
}

/// Fully resolved gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Listener address.
    pub bind_addr: SocketAddr,
    /// Store adapters to wire.
    pub store: StoreBackend,
    /// Include raw diagnostics in 500 responses.
    pub expose_error_details: bool,
    /// Request, checkout and query budget.
    pub request_timeout: Duration,
    /// Origins allowed by CORS; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl GatewayConfig {
    /// Combine loaded settings with the connection string found in `env`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when PostgreSQL is
    /// selected and no candidate variable is set, and the other variants for
    /// unusable values.
    pub fn resolve<E: Env>(settings: &GatewaySettings, env: &E) -> Result<Self, SettingsError> {
        let ip: IpAddr = settings
            .host()
            .parse()
            .map_err(|_| SettingsError::InvalidHost {
                value: settings.host().to_owned(),
            })?;

        let timeout_secs = settings.request_timeout_secs();
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        let cors_origins = settings.cors_origins();
        if let Some(value) = cors_origins
            .iter()
            .find(|origin| !is_http_origin(origin))
        {
            return Err(SettingsError::InvalidCorsOrigin {
                value: value.clone(),
            });
        }

        let store = if settings.in_memory {
            StoreBackend::InMemory
        } else {
            let pool_max_size = settings.pool_max_size();
            if pool_max_size == 0 {
                return Err(SettingsError::ZeroPoolSize);
            }
            let database_url = resolve_database_url(env, &DATABASE_URL_CANDIDATES)
                .ok_or(SettingsError::MissingDatabaseUrl)?;
            StoreBackend::Postgres {
                database_url,
                pool_max_size,
            }
        };

        Ok(Self {
            bind_addr: SocketAddr::new(ip, settings.port()),
            store,
            expose_error_details: settings.expose_error_details,
            request_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        })
    }
}

fn is_http_origin(origin: &str) -> bool {
    origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
}
