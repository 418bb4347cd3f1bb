//! Tests for job application HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::ports::{ApplicationRepositoryError, MockApplicationRepository};
use crate::domain::{ApplicationService, ErrorCode, REQUIRED_FIELDS_MESSAGE, TRACE_ID_HEADER};
use crate::inbound::http::configure_api;
use crate::outbound::memory::InMemoryApplicationRepository;

fn state_over<R>(repository: R) -> HttpState
where
    R: crate::domain::ports::ApplicationRepository + 'static,
{
    let service = Arc::new(ApplicationService::new(
        Arc::new(repository),
        Arc::new(mockable::DefaultClock),
    ));
    HttpState::new(service.clone(), service)
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}

fn acme() -> Value {
    json!({
        "company": "Acme",
        "role": "Backend Engineer",
        "status": "applied",
        "location": "",
        "link": "https://acme.example/careers/42",
        "notes": "   "
    })
}

async fn create(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    body: Value,
) -> ApplicationResponseBody {
    let request = actix_test::TestRequest::post()
        .uri("/api/applications")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn create_returns_created_record_with_nulls_for_empty_fields() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;

    let created = create(&app, acme()).await;

    assert!(!created.id.is_empty());
    assert_eq!(created.status, "applied");
    assert_eq!(created.location, None);
    assert_eq!(created.notes, None);
    assert_eq!(created.created_at, created.updated_at);
}

#[actix_web::test]
async fn created_record_serialises_absent_fields_as_null() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/applications")
        .set_json(acme())
        .to_request();

    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["location"], Value::Null);
    assert_eq!(body["source"], Value::Null);
    assert!(body["createdAt"].as_str().is_some_and(|ts| ts.ends_with('Z')));
}

#[rstest]
#[case(json!({ "role": "Engineer", "status": "applied" }), json!(["company"]))]
#[case(json!({ "company": "", "role": "Engineer", "status": "applied" }), json!(["company"]))]
#[case(json!({}), json!(["company", "role", "status"]))]
#[actix_web::test]
async fn create_without_required_fields_is_bad_request(
    #[case] body: Value,
    #[case] missing: Value,
) {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/applications")
        .set_json(body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), REQUIRED_FIELDS_MESSAGE);
    assert_eq!(error.details().map(|details| &details["fields"]), Some(&missing));

    let list = actix_test::TestRequest::get().uri("/api/applications").to_request();
    let listed: Vec<ApplicationResponseBody> = actix_test::call_and_read_body_json(&app, list).await;
    assert!(listed.is_empty());
}

#[rstest]
#[case(json!({ "status": "ghosted" }), "status")]
#[case(json!({ "link": "not a url" }), "link")]
#[actix_web::test]
async fn create_with_invalid_field_names_it(#[case] overrides: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let mut body = acme();
    if let (Some(target), Some(source)) = (body.as_object_mut(), overrides.as_object()) {
        target.extend(source.clone());
    }
    let request = actix_test::TestRequest::post()
        .uri("/api/applications")
        .set_json(body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.details().map(|details| &details["field"]), Some(&json!(field)));
}

#[actix_web::test]
async fn get_returns_record_equal_to_create_result() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let created = create(&app, acme()).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/applications/{}", created.id))
        .to_request();
    let fetched: ApplicationResponseBody = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn get_unknown_id_is_not_found_with_trace_id() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let request = actix_test::TestRequest::get()
        .uri("/api/applications/does-not-exist")
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.trace_id().map(str::to_owned), header);
}

#[actix_web::test]
async fn update_changes_only_supplied_fields() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let created = create(&app, acme()).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/applications/{}", created.id))
        .set_json(json!({ "status": "interview", "company": null }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ApplicationResponseBody = actix_test::read_body_json(response).await;

    assert_eq!(updated.status, "interview");
    assert_eq!(
        ApplicationResponseBody {
            status: created.status.clone(),
            updated_at: created.updated_at.clone(),
            ..updated.clone()
        },
        created
    );
    assert!(updated.updated_at > created.updated_at);
}

#[actix_web::test]
async fn update_can_clear_optional_field() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let created = create(&app, acme()).await;
    assert!(created.link.is_some());

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/applications/{}", created.id))
        .set_json(json!({ "link": "" }))
        .to_request();
    let updated: ApplicationResponseBody = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(updated.link, None);
}

#[actix_web::test]
async fn update_unknown_id_is_not_found() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let request = actix_test::TestRequest::put()
        .uri("/api/applications/ghost")
        .set_json(json!({ "status": "offer" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_unknown_id_with_invalid_body_is_not_found() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let request = actix_test::TestRequest::put()
        .uri("/api/applications/ghost")
        .set_json(json!({ "role": "  " }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/applications")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"company\": ")
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[actix_web::test]
async fn delete_removes_record_and_second_delete_is_not_found() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    let created = create(&app, acme()).await;
    let uri = format!("/api/applications/{}", created.id);

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(actix_test::read_body(first).await.is_empty());

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let lookup =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn list_returns_newest_first() {
    let app = actix_test::init_service(test_app(state_over(InMemoryApplicationRepository::new())))
        .await;
    for company in ["A", "B", "C"] {
        create(
            &app,
            json!({ "company": company, "role": "Engineer", "status": "wishlist" }),
        )
        .await;
    }

    let request = actix_test::TestRequest::get().uri("/api/applications").to_request();
    let listed: Vec<ApplicationResponseBody> = actix_test::call_and_read_body_json(&app, request).await;

    let companies: Vec<&str> = listed.iter().map(|app| app.company.as_str()).collect();
    assert_eq!(companies, ["C", "B", "A"]);
}

#[actix_web::test]
async fn store_failures_are_redacted_internal_errors() {
    let mut repo = MockApplicationRepository::new();
    repo.expect_list()
        .return_once(|| Err(ApplicationRepositoryError::connection("password=hunter2")));
    let app = actix_test::init_service(test_app(state_over(repo))).await;

    let request = actix_test::TestRequest::get().uri("/api/applications").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
    assert!(error.trace_id().is_some());
}
