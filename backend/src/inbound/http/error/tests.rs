//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::json;

use crate::domain::DNI_NOT_REGISTERED_MESSAGE;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

fn store_fault() -> Error {
    Error::internal("attendance registration failed: connection refused")
        .with_details(json!("connection refused"))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ApiError::from_domain(error).status_code(), expected);
}

#[actix_web::test]
async fn invalid_dni_uses_fixed_message() {
    let response = ApiError::invalid_dni().error_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "message": INVALID_DNI_MESSAGE})
    );
}

#[actix_web::test]
async fn not_found_keeps_domain_message() {
    let response =
        ApiError::from_domain(Error::not_found(DNI_NOT_REGISTERED_MESSAGE)).error_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "message": DNI_NOT_REGISTERED_MESSAGE})
    );
}

#[actix_web::test]
async fn internal_errors_are_redacted_by_default() {
    let response = ApiError::from_domain(store_fault()).error_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "message": INTERNAL_ERROR_MESSAGE})
    );
}

#[actix_web::test]
async fn internal_errors_expose_details_when_enabled() {
    let response = ApiError::from_domain(store_fault())
        .exposing_details(true)
        .error_response();

    assert_eq!(
        body_json(response).await,
        json!({
            "success": false,
            "message": INTERNAL_ERROR_MESSAGE,
            "details": "connection refused",
        })
    );
}

#[rstest]
fn non_internal_errors_never_expose_details() {
    let error = Error::not_found("missing").with_details(json!({"secret": "x"}));

    let envelope = ApiError::from_domain(error).exposing_details(true).envelope();

    assert!(envelope.details.is_none());
}

#[tokio::test]
async fn trace_id_is_captured_and_sent_as_header() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let api_error = TraceId::scope(trace_id, async {
        ApiError::from_domain(Error::not_found("missing"))
    })
    .await;

    assert_eq!(api_error.trace_id(), Some(TRACE_ID));
    let response = api_error.error_response();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, TRACE_ID);
}

#[rstest]
fn trace_id_is_absent_outside_a_request() {
    let api_error = ApiError::from_domain(Error::internal("boom"));

    assert!(api_error.trace_id().is_none());
    assert!(api_error.error_response().headers().get(TRACE_ID_HEADER).is_none());
}

#[actix_web::test]
async fn json_payload_errors_become_invalid_dni() {
    let request = TestRequest::default().to_http_request();

    let error = json_error_handler(JsonPayloadError::ContentType, &request);
    let response = error.error_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "message": INVALID_DNI_MESSAGE})
    );
}

#[actix_web::test]
async fn form_payload_errors_become_invalid_dni() {
    let request = TestRequest::default().to_http_request();

    let error = form_error_handler(UrlencodedError::ContentType, &request);
    let response = error.error_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "message": INVALID_DNI_MESSAGE})
    );
}
