//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::ports::{AttendanceCommand, RosterQuery, StoreHealth};
use crate::inbound::http::error::ApiError;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub roster: Arc<dyn RosterQuery>,
    pub attendance: Arc<dyn AttendanceCommand>,
    pub store_health: Arc<dyn StoreHealth>,
    /// Include raw store diagnostics in 500 bodies.
    pub expose_error_details: bool,
}

impl HttpState {
    /// Construct state with diagnostics hidden from clients.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use attendance_backend::domain::AttendanceService;
    /// use attendance_backend::inbound::http::state::HttpState;
    /// use attendance_backend::outbound::memory::InMemoryAttendanceStore;
    ///
    /// let store = Arc::new(InMemoryAttendanceStore::with_default_roster());
    /// let service = Arc::new(AttendanceService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(service.clone(), service, store);
    /// assert!(!state.expose_error_details);
    /// ```
    pub fn new(
        roster: Arc<dyn RosterQuery>,
        attendance: Arc<dyn AttendanceCommand>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            roster,
            attendance,
            store_health,
            expose_error_details: false,
        }
    }

    /// Toggle exposure of raw store diagnostics.
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }

    /// Bind a domain failure to the current request using this state's
    /// diagnostic policy.
    pub fn api_error(&self, error: Error) -> ApiError {
        ApiError::from_domain(error).exposing_details(self.expose_error_details)
    }
}
