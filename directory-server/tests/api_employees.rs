//! HTTP contract tests for the employee API.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use directory_server::api;
use directory_server::core::{Config, ServerState};
use directory_server::db::DbService;

async fn app() -> Router {
    let db = DbService::memory().await.expect("in-memory database");
    let state = ServerState::new(Config::with_overrides("unused", 0), db.db);
    api::router().with_state(state)
}

fn employee_body(id_number: &str) -> Value {
    json!({
        "first_name": "Ana",
        "first_surname": "Gomez",
        "second_surname": "Perez",
        "employment_country": "CO",
        "id_type": "CC",
        "id_number": id_number,
        "hire_date": Utc::now().date_naive().to_string(),
        "department": "ADM"
    })
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = app().await;
    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn create_returns_full_record() {
    let app = app().await;
    let (status, body) =
        send_json(&app, "POST", "/api/employees", Some(employee_body("100"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana.gomez@cidenet.com.co");
    assert_eq!(body["status"], "Active");
    assert_eq!(body["first_name"], "ANA");
    assert!(body["id"].as_str().unwrap().starts_with("employee:"));
    assert!(body["created_at"].is_i64());
    assert!(body["updated_at"].is_null());
}

#[tokio::test]
async fn create_rejects_system_owned_fields() {
    let app = app().await;
    let mut payload = employee_body("100");
    payload["email"] = json!("ana@evil.example");

    let (status, _) = send_json(&app, "POST", "/api/employees", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn validation_errors_are_reported_per_field() {
    let app = app().await;
    let mut payload = employee_body("100");
    payload["first_name"] = json!("Ana Maria");
    payload["hire_date"] = json!((Utc::now().date_naive() + Duration::days(5)).to_string());

    let (status, body) = send_json(&app, "POST", "/api/employees", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    let errors = body["data"].as_array().unwrap();
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"first_name"));
    assert!(fields.contains(&"hire_date"));
}

#[tokio::test]
async fn duplicate_identity_returns_validation_envelope() {
    let app = app().await;
    send_json(&app, "POST", "/api/employees", Some(employee_body("100"))).await;

    let mut payload = employee_body("100");
    payload["first_name"] = json!("Luis");
    let (status, body) = send_json(&app, "POST", "/api/employees", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
    assert_eq!(body["data"][0]["field"], "id_number");
}

#[tokio::test]
async fn get_missing_returns_not_found_envelope() {
    let app = app().await;
    let (status, body) = send_json(&app, "GET", "/api/employees/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn invalid_ordering_is_a_validation_error() {
    let app = app().await;
    let (status, body) = send_json(&app, "GET", "/api/employees?ordering=email", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
    assert_eq!(body["data"][0]["field"], "ordering");
}

#[tokio::test]
async fn crud_flow_over_http() {
    let app = app().await;

    // create
    let (status, created) =
        send_json(&app, "POST", "/api/employees", Some(employee_body("100"))).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();

    // list with a filter
    let (status, listed) =
        send_json(&app, "GET", "/api/employees?first_surname=gom", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // update: department changes, email does not
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(json!({ "department": "FIN" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["department"], "FIN");
    assert_eq!(updated["email"], created["email"]);
    assert!(updated["updated_at"].is_i64());

    // update attempts on system-owned fields are rejected
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(json!({ "status": "Retired" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // delete
    let (status, deleted) =
        send_json(&app, "DELETE", &format!("/api/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!(true));

    // gone
    let (status, _) = send_json(&app, "GET", &format!("/api/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_sorted_by_surname_by_default() {
    let app = app().await;

    for (first, surname, id_number) in [
        ("Ana", "Zapata", "100"),
        ("Luis", "Arango", "200"),
    ] {
        let mut payload = employee_body(id_number);
        payload["first_name"] = json!(first);
        payload["first_surname"] = json!(surname);
        let (status, _) = send_json(&app, "POST", "/api/employees", Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, listed) = send_json(&app, "GET", "/api/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    let surnames: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["first_surname"].as_str().unwrap())
        .collect();
    assert_eq!(surnames, ["ARANGO", "ZAPATA"]);
}
