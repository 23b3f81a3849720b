//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body()).await.expect("read body");
    let body = serde_json::from_slice(&bytes).expect("JSON body");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("Wrong password"), StatusCode::UNAUTHORIZED)]
#[case(Error::duplicate_email("taken"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::user_not_found("gone"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::store_unavailable("down"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_follows_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_the_trace_id() {
    let err = Error::internal("db password leaked in message")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "x" }));

    let (status, header, body) = body_of(&err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE_ID
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let err = Error::invalid_request("Validation failed")
        .with_details(json!({ "fields": { "email": "The email is invalid." } }));

    let (status, header, body) = body_of(&err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(header.is_none());
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["details"]["fields"]["email"], "The email is invalid.");
}

#[rstest]
#[actix_web::test]
async fn store_errors_are_not_redacted() {
    let (_, _, body) = body_of(&Error::duplicate_email("email already registered")).await;
    assert_eq!(body["code"], "duplicate_email");
    assert_eq!(body["message"], "email already registered");
}
