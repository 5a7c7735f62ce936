//! Health endpoints.
//!
//! `GET /` reports whether the backing store answers a ping. The
//! `/health/ready` and `/health/live` checks report process state for
//! orchestrators and never touch the store.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::error;

use crate::inbound::http::state::HttpState;

/// Body returned by `GET /` when the store is reachable.
pub const STORE_CONNECTED_MESSAGE: &str = "Backend de Asistencia funcionando y conectado a la BD.";

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as draining so both health checks fail during shutdown.
    pub fn mark_unhealthy(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn status_response(healthy: bool) -> HttpResponse {
        let mut response = if healthy {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Store connectivity check.
///
/// Returns 200 with a fixed text when the store answers and 500 with the
/// store's diagnostic otherwise.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses(
        (status = 200, description = "Store reachable", body = String, content_type = "text/plain"),
        (status = 500, description = "Store unreachable", body = String, content_type = "text/plain")
    ),
    operation_id = "storeStatus"
)]
#[get("/")]
pub async fn store_status(state: web::Data<HttpState>) -> HttpResponse {
    match state.store_health.ping().await {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(STORE_CONNECTED_MESSAGE),
        Err(err) => {
            error!(error = %err, "store ping failed");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Error al conectar con la BD: {err}"))
        }
    }
}

/// Readiness check. Return 200 once the server is constructed and 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_ready())
}

/// Liveness check. Return 200 while the process is marked alive and 503 once
/// draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::rstest;

    use crate::domain::ports::{
        MockAttendanceCommand, MockRosterQuery, MockStoreHealth, StoreHealthError,
    };

    fn http_state(store_health: MockStoreHealth) -> HttpState {
        HttpState::new(
            Arc::new(MockRosterQuery::new()),
            Arc::new(MockAttendanceCommand::new()),
            Arc::new(store_health),
        )
    }

    #[actix_web::test]
    async fn store_status_reports_connected_store() {
        let mut store_health = MockStoreHealth::new();
        store_health.expect_ping().times(1).returning(|| Ok(()));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state(store_health)))
                .service(store_status),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), STORE_CONNECTED_MESSAGE.as_bytes());
    }

    #[actix_web::test]
    async fn store_status_reports_diagnostic_on_failure() {
        let mut store_health = MockStoreHealth::new();
        store_health
            .expect_ping()
            .times(1)
            .returning(|| Err(StoreHealthError::unreachable("connection refused")));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state(store_health)))
                .service(store_status),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
            .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body");
        assert!(body.contains("connection refused"));
    }

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_state(#[case] mark_ready: bool, #[case] expected: StatusCode) {
        let health = web::Data::new(HealthState::new());
        if mark_ready {
            health.mark_ready();
        }
        let app = actix_test::init_service(App::new().app_data(health).service(ready)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(b"no-store".as_slice())
        );
    }

    #[actix_web::test]
    async fn liveness_fails_once_unhealthy() {
        let health = web::Data::new(HealthState::new());
        let app = actix_test::init_service(App::new().app_data(health.clone()).service(live)).await;

        let alive = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(alive.status(), StatusCode::OK);

        health.mark_unhealthy();
        let draining = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(draining.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
