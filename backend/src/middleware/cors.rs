//! Cross-origin resource sharing policy for browser clients.

use actix_cors::Cors;

/// Build the CORS middleware for the configured origins.
///
/// An empty list accepts every origin and answers with a wildcard
/// `Access-Control-Allow-Origin`. Otherwise only the listed origins are
/// echoed back. Any method and request header is allowed in both cases.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use attendance_backend::middleware::cors_policy;
///
/// let _app = App::new().wrap(cors_policy(&[]));
/// ```
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin().send_wildcard()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };
    cors.allow_any_method().allow_any_header()
}
