//! HTTP error envelope and mapping from domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the `{success:false, message}` body and
//! matching status code.

use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::{TRACE_ID_HEADER, TraceId};

/// Client-facing message for a DNI that is missing or not 8 characters long.
pub const INVALID_DNI_MESSAGE: &str = "DNI no válido (Debe tener 8 caracteres).";

/// Client-facing message replacing every storage fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor de Base de Datos.";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure body shared by every attendance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    /// Human-readable description in the client's language.
    #[schema(example = "DNI de Hermano no registrado.")]
    pub message: String,
    /// Raw store diagnostic, present only when diagnostics are exposed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Domain failure bound to the request that produced it.
///
/// Captures the ambient [`TraceId`] on construction and whether raw
/// diagnostics may reach the client.
#[derive(Debug, Clone)]
pub struct ApiError {
    error: Error,
    trace_id: Option<String>,
    expose_details: bool,
}

impl ApiError {
    /// Wrap a domain error, hiding any diagnostic details.
    pub fn from_domain(error: Error) -> Self {
        Self {
            error,
            trace_id: TraceId::current().map(|id| id.to_string()),
            expose_details: false,
        }
    }

    /// Rejection for a missing or malformed DNI.
    pub fn invalid_dni() -> Self {
        Self::from_domain(Error::invalid_request(INVALID_DNI_MESSAGE))
    }

    /// Allow or suppress the `details` field for internal errors.
    pub fn exposing_details(mut self, expose: bool) -> Self {
        self.expose_details = expose;
        self
    }

    /// Wrapped domain error.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Trace identifier propagated into the response header.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Body sent to the client.
    ///
    /// Internal errors always carry [`INTERNAL_ERROR_MESSAGE`]; their
    /// diagnostic appears under `details` only when exposure is enabled.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self.error.code() {
            ErrorCode::InternalError => ErrorEnvelope {
                success: false,
                message: INTERNAL_ERROR_MESSAGE.to_owned(),
                details: self
                    .expose_details
                    .then(|| self.error.details().cloned())
                    .flatten(),
            },
            _ => ErrorEnvelope {
                success: false,
                message: self.error.message().to_owned(),
                details: None,
            },
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self::from_domain(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.error.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        builder.json(self.envelope())
    }
}

/// Map JSON extraction failures (malformed body, non-string `dni`) to the
/// invalid-DNI envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected unreadable attendance payload");
    ApiError::invalid_dni().into()
}

/// Map urlencoded form extraction failures to the invalid-DNI envelope.
pub fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected unreadable attendance form");
    ApiError::invalid_dni().into()
}

#[cfg(test)]
mod tests;
