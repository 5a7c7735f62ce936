//! Builders wiring store adapters into the HTTP state.

use std::sync::Arc;

use tracing::info;

use attendance_backend::domain::AttendanceService;
use attendance_backend::inbound::http::state::HttpState;
use attendance_backend::outbound::memory::InMemoryAttendanceStore;
use attendance_backend::outbound::persistence::{
    DbPool, DieselAttendanceRepository, DieselRosterRepository, DieselStoreHealth,
};

use super::ServerConfig;

fn postgres_state(pool: &DbPool) -> HttpState {
    let service = Arc::new(AttendanceService::new(
        Arc::new(DieselRosterRepository::new(pool.clone())),
        Arc::new(DieselAttendanceRepository::new(pool.clone())),
    ));
    HttpState::new(
        service.clone(),
        service,
        Arc::new(DieselStoreHealth::new(pool.clone())),
    )
}

fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryAttendanceStore::with_default_roster());
    let service = Arc::new(AttendanceService::new(store.clone(), store.clone()));
    HttpState::new(service.clone(), service, store)
}

/// Build the HTTP state from configuration.
///
/// Uses the PostgreSQL adapters when a pool is configured and the built-in
/// roster otherwise. The in-memory store is created once so every worker
/// shares the same attendance list.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving attendance from PostgreSQL");
            postgres_state(pool)
        }
        None => {
            info!("serving attendance from the in-memory roster");
            in_memory_state()
        }
    };
    state.with_error_details(config.expose_error_details)
}
