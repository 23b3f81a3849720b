//! End-to-end tests of the users API over the in-memory store.
//!
//! Requests run through the production handlers, the trace middleware, and
//! the real registry service. The clock is frozen at 2024-06-01.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use support::{ADMIN_PASSWORD, registration, registry_app, registry_state};
use user_registry::domain::TRACE_ID_HEADER;

/// `GET /users` as parsed JSON.
macro_rules! list_users {
    ($app:expr) => {{
        let request = actix_test::TestRequest::get().uri("/users").to_request();
        let body: Vec<Value> = actix_test::call_and_read_body_json(&$app, request).await;
        body
    }};
}

macro_rules! register {
    ($app:expr, $payload:expr) => {{
        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json($payload)
            .to_request();
        actix_test::call_service(&$app, request).await
    }};
}

macro_rules! delete {
    ($app:expr, $id:expr, $payload:expr) => {{
        let request = actix_test::TestRequest::delete()
            .uri(&format!("/users/{}", $id))
            .set_json($payload)
            .to_request();
        actix_test::call_service(&$app, request).await
    }};
}

#[actix_web::test]
async fn registered_users_appear_in_listing() {
    let app = actix_test::init_service(registry_app(registry_state())).await;

    let response = register!(app, registration("jean.dupont@example.com"));
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("jean.dupont@example.com"));

    let users = list_users!(app);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], body["user"]["id"]);
    assert_eq!(users[0]["dateBirth"], json!("1990-01-01"));
}

#[rstest]
#[case::turns_eighteen_today("2006-06-01")]
#[case::seventeen("2007-01-15")]
#[case::eighteen_and_a_day("2006-05-31")]
#[actix_web::test]
async fn applicants_not_older_than_eighteen_are_refused(#[case] birth: &str) {
    let app = actix_test::init_service(registry_app(registry_state())).await;
    let mut payload = registration("minor@example.com");
    payload["dateBirth"] = json!(birth);

    let response = register!(app, payload);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["reason"], json!("not_adult"));
    assert!(list_users!(app).is_empty());
}

#[actix_web::test]
async fn nineteen_year_olds_are_accepted() {
    let app = actix_test::init_service(registry_app(registry_state())).await;
    let mut payload = registration("adult@example.com");
    payload["dateBirth"] = json!("2005-06-01");

    let response = register!(app, payload);

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn invalid_fields_are_reported_by_name() {
    let app = actix_test::init_service(registry_app(registry_state())).await;
    let mut payload = registration("not-an-email");
    payload["postalCode"] = json!("0600");
    payload["firstname"] = json!("J3an");

    let response = register!(app, payload);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let fields = body["details"]["fields"]
        .as_object()
        .expect("fields object");
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("postalCode"));
    assert!(fields.contains_key("firstname"));
    assert!(!fields.contains_key("city"));
}

#[actix_web::test]
async fn duplicate_emails_collide_regardless_of_case() {
    let app = actix_test::init_service(registry_app(registry_state())).await;
    let first = register!(app, registration("jean.dupont@example.com"));
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = register!(app, registration("Jean.Dupont@EXAMPLE.com"));

    assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["code"], json!("duplicate_email"));
    assert_eq!(list_users!(app).len(), 1);
}

#[actix_web::test]
async fn delete_with_correct_password_removes_the_user() {
    let app = actix_test::init_service(registry_app(registry_state())).await;
    let created = register!(app, registration("jean.dupont@example.com"));
    let created: Value = actix_test::read_body_json(created).await;
    let id = created["user"]["id"].as_str().expect("id").to_owned();

    let response = delete!(app, id, json!({ "password": ADMIN_PASSWORD }));

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "success": true }));
    assert!(list_users!(app).is_empty());
}

#[actix_web::test]
async fn delete_with_wrong_password_keeps_the_user() {
    let app = actix_test::init_service(registry_app(registry_state())).await;
    let created = register!(app, registration("jean.dupont@example.com"));
    let created: Value = actix_test::read_body_json(created).await;
    let id = created["user"]["id"].as_str().expect("id").to_owned();

    let response = delete!(app, id, json!({ "password": "guess" }));

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!("unauthorized"));
    assert_eq!(list_users!(app).len(), 1);
}

#[actix_web::test]
async fn deleting_an_unknown_user_fails_with_not_found_code() {
    let app = actix_test::init_service(registry_app(registry_state())).await;

    let response = delete!(
        app,
        "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        json!({ "password": ADMIN_PASSWORD })
    );

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("user_not_found"));
}

#[rstest]
#[case::missing_password("3fa85f64-5717-4562-b3fc-2c963f66afa6", json!({}))]
#[case::malformed_id("not-a-uuid", json!({ "password": ADMIN_PASSWORD }))]
#[actix_web::test]
async fn malformed_delete_requests_are_bad_requests(#[case] id: &str, #[case] payload: Value) {
    let app = actix_test::init_service(registry_app(registry_state())).await;

    let response = delete!(app, id, payload);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
