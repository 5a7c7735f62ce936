//! Attendance API handlers.
//!
//! ```text
//! POST /asistencia/validar {"dni":"12345678"}
//! POST /asistencia/registrar {"dni":"12345678"}
//! ```
//!
//! Both endpoints also accept `application/x-www-form-urlencoded` bodies
//! (`dni=12345678`).

use actix_web::{Either, HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{AttendanceRecord, Dni, Person};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorEnvelope};
use crate::inbound::http::state::HttpState;

/// Client-facing message for a successful validation.
pub const DNI_VERIFIED_MESSAGE: &str = "DNI verificado";

/// Request body shared by both attendance endpoints.
///
/// `dni` is optional here so a missing field yields the same 400 envelope
/// as a malformed one.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DniRequest {
    #[schema(example = "12345678")]
    #[serde(default)]
    pub dni: Option<String>,
}

impl DniRequest {
    fn into_dni(self) -> Result<Dni, ApiError> {
        let raw = self.dni.ok_or_else(|| {
            debug!("attendance request without dni");
            ApiError::invalid_dni()
        })?;
        Dni::new(&raw).map_err(|err| {
            debug!(error = %err, "rejected malformed dni");
            ApiError::invalid_dni()
        })
    }
}

/// Body accepted as either JSON or an urlencoded form.
///
/// JSON is tried first; when both extractors fail the JSON rejection is
/// reported.
pub type DniBody = Either<web::Json<DniRequest>, web::Form<DniRequest>>;

fn dni_from_body(body: DniBody) -> Result<Dni, ApiError> {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
    .into_dni()
}

/// Roster entry returned by `validar`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PersonPayload {
    #[schema(example = "Ana García")]
    pub nombre: String,
    #[schema(example = "12345678")]
    pub dni: String,
    /// Group name; `null` when the roster has none.
    #[schema(example = "Grupo Norte")]
    pub grupo: Option<String>,
}

impl From<Person> for PersonPayload {
    fn from(person: Person) -> Self {
        Self {
            nombre: person.name().to_owned(),
            dni: person.dni().to_string(),
            grupo: person.group().map(str::to_owned),
        }
    }
}

/// Successful `validar` body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ValidateResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "DNI verificado")]
    pub message: String,
    pub data: PersonPayload,
}

/// Stored attendance event returned by `registrar`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RecordPayload {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "12345678")]
    pub dni: String,
    #[schema(example = "Ana García")]
    pub nombre: String,
    pub fecha: DateTime<Utc>,
    #[schema(example = "ENTRADA")]
    pub tipo: String,
}

impl From<AttendanceRecord> for RecordPayload {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id,
            dni: record.dni.to_string(),
            nombre: record.name,
            fecha: record.recorded_at,
            tipo: record.kind.as_str().to_owned(),
        }
    }
}

/// Successful `registrar` body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Asistencia registrada para Ana García.")]
    pub message: String,
    pub registro: RecordPayload,
}

/// Check that a DNI belongs to a registered person.
#[utoipa::path(
    post,
    path = "/asistencia/validar",
    request_body(content(
        (DniRequest = "application/json"),
        (DniRequest = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "DNI registered", body = ValidateResponse),
        (status = 400, description = "DNI missing or not 8 characters", body = ErrorEnvelope),
        (status = 404, description = "DNI not registered", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["attendance"],
    operation_id = "validateDni"
)]
#[post("/validar")]
pub async fn validar(
    state: web::Data<HttpState>,
    payload: DniBody,
) -> ApiResult<web::Json<ValidateResponse>> {
    let dni = dni_from_body(payload)?;
    let person = state
        .roster
        .validate(&dni)
        .await
        .map_err(|err| state.api_error(err))?;
    Ok(web::Json(ValidateResponse {
        success: true,
        message: DNI_VERIFIED_MESSAGE.to_owned(),
        data: person.into(),
    }))
}

/// Record an entry for a registered person.
///
/// Not idempotent: every successful call stores a new record.
#[utoipa::path(
    post,
    path = "/asistencia/registrar",
    request_body(content(
        (DniRequest = "application/json"),
        (DniRequest = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 201, description = "Attendance recorded", body = RegisterResponse),
        (status = 400, description = "DNI missing or not 8 characters", body = ErrorEnvelope),
        (status = 404, description = "DNI not registered", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["attendance"],
    operation_id = "registerAttendance"
)]
#[post("/registrar")]
pub async fn registrar(
    state: web::Data<HttpState>,
    payload: DniBody,
) -> ApiResult<HttpResponse> {
    let dni = dni_from_body(payload)?;
    let record = state
        .attendance
        .register(&dni)
        .await
        .map_err(|err| state.api_error(err))?;
    let message = format!("Asistencia registrada para {}.", record.name);
    Ok(HttpResponse::Created().json(RegisterResponse {
        success: true,
        message,
        registro: record.into(),
    }))
}
