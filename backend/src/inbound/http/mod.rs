//! HTTP inbound adapter exposing the attendance endpoints.

use actix_web::web;

pub mod attendance;
pub mod error;
pub mod health;
pub mod state;

pub use error::ApiResult;

use attendance::{registrar, validar};
use error::{form_error_handler, json_error_handler};
use health::{live, ready, store_status};

/// Register every HTTP route and the body extractor configuration.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use attendance_backend::Trace;
/// use attendance_backend::inbound::http::configure;
///
/// let _app = App::new().wrap(Trace).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::FormConfig::default().error_handler(form_error_handler))
        .service(store_status)
        .service(web::scope("/asistencia").service(validar).service(registrar))
        .service(ready)
        .service(live);
}
