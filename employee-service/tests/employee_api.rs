//! HTTP-level tests for the `/employee` endpoints against the in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use employee_service::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    fn employees(&self) -> Vec<Employee> {
        serde_json::from_slice(&self.body).expect("response body is an employee list")
    }

    fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("Location header")
    }
}

fn app() -> Router {
    router(AppState::new(Config::default(), InMemoryEmployeeStore::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

async fn create(app: &Router, first_name: &str, last_name: &str) -> String {
    let response = send(
        app,
        Method::PUT,
        "/employee",
        Some(json!({"firstName": first_name, "lastName": last_name})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.location().to_string()
}

fn ids(employees: &[Employee]) -> Vec<EmployeeId> {
    let mut ids: Vec<_> = employees.iter().filter_map(|e| e.id).collect();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn create_then_retrieve_by_location() {
    let app = app();

    let response = send(
        &app,
        Method::PUT,
        "/employee",
        Some(json!({"firstName": "John", "lastName": "Smith"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
    assert_eq!(response.location(), "/employee/1");

    let fetched = send(&app, Method::GET, response.location(), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(
        fetched.json(),
        json!({"id": 1, "firstName": "John", "lastName": "Smith"})
    );
}

#[tokio::test]
async fn create_ignores_body_identifier() {
    let app = app();

    let response = send(
        &app,
        Method::PUT,
        "/employee/",
        Some(json!({"id": 99, "firstName": "Ada", "lastName": "Lovelace"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.location(), "/employee/1");

    let missing = send(&app, Method::GET, "/employee/99", None).await;
    assert_eq!(missing.json(), Value::Null);
}

#[tokio::test]
async fn retrieve_missing_returns_null() {
    let app = app();

    let response = send(&app, Method::GET, "/employee/12345", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"null");
}

#[tokio::test]
async fn update_with_unused_id_inserts_then_merges() {
    let app = app();

    let first = send(
        &app,
        Method::PUT,
        "/employee/42",
        Some(json!({"firstName": "Grace", "lastName": "Hopper"})),
    )
    .await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.body.is_empty());

    let second = send(
        &app,
        Method::PUT,
        "/employee/42",
        Some(json!({"id": 7, "firstName": "Grace", "lastName": "Murray"})),
    )
    .await;
    assert_eq!(second.status, StatusCode::OK);

    let all = send(&app, Method::GET, "/employee", None).await.employees();
    assert_eq!(all, vec![Employee::new("Grace", "Murray").with_id(42)]);

    // later inserts do not collide with the explicit id
    let location = create(&app, "Alan", "Turing").await;
    assert_eq!(location, "/employee/43");
}

#[tokio::test]
async fn create_after_largest_id_is_a_conflict() {
    let app = app();

    let merged = send(
        &app,
        Method::PUT,
        "/employee/9223372036854775807",
        Some(json!({"firstName": "Grace", "lastName": "Hopper"})),
    )
    .await;
    assert_eq!(merged.status, StatusCode::OK);

    let created = send(
        &app,
        Method::PUT,
        "/employee",
        Some(json!({"firstName": "Alan", "lastName": "Turing"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CONFLICT);

    let kept = send(&app, Method::GET, "/employee/9223372036854775807", None).await;
    assert_eq!(
        kept.json(),
        json!({"id": 9223372036854775807_i64, "firstName": "Grace", "lastName": "Hopper"})
    );
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();
    let location = create(&app, "John", "Smith").await;

    let deleted = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.body.is_empty());

    let again = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(again.status, StatusCode::OK);

    let never_existed = send(&app, Method::DELETE, "/employee/999", None).await;
    assert_eq!(never_existed.status, StatusCode::OK);

    let fetched = send(&app, Method::GET, &location, None).await;
    assert_eq!(fetched.json(), Value::Null);
}

#[tokio::test]
async fn missing_required_field_is_412_keyed_by_property() {
    let app = app();

    let response = send(
        &app,
        Method::PUT,
        "/employee",
        Some(json!({"lastName": "Smith"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(response.json(), json!({"firstName": "may not be null"}));

    let all = send(&app, Method::GET, "/employee", None).await.employees();
    assert!(all.is_empty());
}

#[tokio::test]
async fn length_violations_report_every_property() {
    let app = app();

    let response = send(
        &app,
        Method::PUT,
        "/employee/3",
        Some(json!({"firstName": "", "lastName": "x".repeat(51)})),
    )
    .await;
    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(
        response.json(),
        json!({
            "firstName": "size must be between 1 and 50",
            "lastName": "size must be between 1 and 50"
        })
    );
}

#[tokio::test]
async fn search_matches_case_sensitive_substrings() {
    let app = app();
    create(&app, "John", "Smith").await;
    create(&app, "Johnny", "Appleseed").await;
    create(&app, "Mary", "Jones").await;
    create(&app, "jo", "Lower").await;

    let by_first = send(
        &app,
        Method::POST,
        "/employee/search",
        Some(json!({"firstName": "John"})),
    )
    .await;
    assert_eq!(by_first.status, StatusCode::OK);
    assert_eq!(ids(&by_first.employees()), vec![1, 2]);

    let by_last = send(
        &app,
        Method::POST,
        "/employee/search",
        Some(json!({"lastName": "Smith"})),
    )
    .await;
    assert_eq!(ids(&by_last.employees()), vec![1]);

    let jo = send(
        &app,
        Method::POST,
        "/employee/search",
        Some(json!({"firstName": "Jo"})),
    )
    .await;
    assert_eq!(ids(&jo.employees()), vec![1, 2]);

    let both = send(
        &app,
        Method::POST,
        "/employee/search",
        Some(json!({"firstName": "Jo", "lastName": "Apple"})),
    )
    .await;
    assert_eq!(ids(&both.employees()), vec![2]);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let app = app();
    create(&app, "Ann", "O_Neil").await;
    create(&app, "Bob", "OxNeil").await;

    let response = send(
        &app,
        Method::POST,
        "/employee/search",
        Some(json!({"lastName": "O_N"})),
    )
    .await;
    assert_eq!(ids(&response.employees()), vec![1]);
}

#[tokio::test]
async fn search_without_criteria_lists_all() {
    let app = app();
    create(&app, "John", "Smith").await;
    create(&app, "Johnny", "Appleseed").await;

    let listed = send(&app, Method::GET, "/employee", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let all = ids(&listed.employees());
    assert_eq!(all, vec![1, 2]);

    let null_criteria = send(&app, Method::POST, "/employee/search", Some(Value::Null)).await;
    assert_eq!(ids(&null_criteria.employees()), all);

    let no_body = send(&app, Method::POST, "/employee/search", None).await;
    assert_eq!(ids(&no_body.employees()), all);

    let empty_names = send(
        &app,
        Method::POST,
        "/employee/search",
        Some(json!({"firstName": "", "lastName": ""})),
    )
    .await;
    assert_eq!(ids(&empty_names.employees()), all);
}

#[tokio::test]
async fn malformed_search_body_is_rejected() {
    let app = app();

    let request = Request::post("/employee/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let app = app();

    for uri in ["/employee/abc", "/employee/-1", "/employee/1.5"] {
        let response = send(&app, Method::GET, uri, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
    }

    let response = send(
        &app,
        Method::PUT,
        "/employee/abc",
        Some(json!({"firstName": "John", "lastName": "Smith"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_readiness() {
    let app = app();

    let health = send(&app, Method::GET, "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.json()["service"], "employee-service");

    let ready = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.json()["ready"], true);
    assert_eq!(ready.json()["dependencies"]["memory"]["healthy"], true);
}
