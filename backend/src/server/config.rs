//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use attendance_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) request_timeout: Duration,
    pub(crate) expose_error_details: bool,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Construct a configuration serving the in-memory roster.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, request_timeout: Duration) -> Self {
        Self {
            bind_addr,
            request_timeout,
            expose_error_details: false,
            db_pool: None,
            cors_origins: Vec::new(),
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, the server uses the PostgreSQL adapters instead of the
    /// in-memory roster.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Include raw store diagnostics in 500 responses.
    #[must_use]
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }

    /// Restrict CORS to the given origins. An empty list allows any origin.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }
}
