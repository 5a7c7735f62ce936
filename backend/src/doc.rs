//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the attendance and health endpoints together with the
//! request and response bodies declared in the inbound layer. The document is
//! served by Swagger UI in debug builds and exported by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::inbound::http::attendance::{
    DniRequest, PersonPayload, RecordPayload, RegisterResponse, ValidateResponse,
};
use crate::inbound::http::error::ErrorEnvelope;

/// OpenAPI document for the attendance API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance backend API",
        description = "DNI validation and attendance registration backed by a roster store."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::attendance::validar,
        crate::inbound::http::attendance::registrar,
        crate::inbound::http::health::store_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DniRequest,
        PersonPayload,
        ValidateResponse,
        RecordPayload,
        RegisterResponse,
        ErrorEnvelope
    )),
    tags(
        (name = "attendance", description = "DNI validation and attendance registration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
