//! Route tests: the full router over an in-memory database, driven with
//! `tower::ServiceExt::oneshot` (no socket).

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use latte_db::{Database, DbConfig};
use latte_server::routes::contact::{SUBMIT_FAILED, SUCCESS_REDIRECT};
use latte_server::routes::BANNER;
use latte_server::{build_router, AppState, ServerConfig};

const TOKEN: &str = "letmein";

// =============================================================================
// Helpers
// =============================================================================

async fn setup(admin_token: Option<&str>) -> (Router, AppState) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let config = ServerConfig {
        admin_token: admin_token.map(str::to_string),
        static_dir: "does-not-exist".into(),
        ..ServerConfig::default()
    };
    let state = AppState::new(db, config);

    (build_router(state.clone()), state)
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse {
        status,
        location,
        body,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/submit-contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn latte_order() -> Value {
    json!({
        "customerName": "Ada",
        "customerEmail": "ada@example.com",
        "items": [
            { "name": "Latte", "unitPrice": 4.5, "quantity": 2, "imageUrl": "img/latte.jpg" },
            { "name": "Croissant", "unitPrice": 3, "quantity": 1, "imageUrl": null }
        ]
    })
}

// =============================================================================
// Basics
// =============================================================================

#[tokio::test]
async fn test_root_banner_without_front_end() {
    let (app, _) = setup(None).await;

    let res = send(&app, get("/")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), BANNER);
}

#[tokio::test]
async fn test_health() {
    let (app, _) = setup(None).await;

    let res = send(&app, get("/health")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "status": "ok", "database": "connected" }));
}

#[tokio::test]
async fn test_unknown_path_falls_through_to_static_files() {
    let (app, _) = setup(None).await;

    let res = send(&app, get("/menu.html")).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Contact form
// =============================================================================

#[tokio::test]
async fn test_contact_submit_redirects() {
    let (app, state) = setup(None).await;

    let res = send(
        &app,
        form_request("name=Ada&email=ada%40example.com&message=Table+for+two%3F"),
    )
    .await;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some(SUCCESS_REDIRECT));

    let stored = state.db.contacts().list_recent(1).await.unwrap();
    assert_eq!(stored[0].email, "ada@example.com");
    assert_eq!(stored[0].message, "Table for two?");
}

#[tokio::test]
async fn test_contact_validation_failure_is_400() {
    let (app, state) = setup(None).await;

    let res = send(&app, form_request("name=Ada&message=hello")).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.text(), "email is required");
    assert_eq!(state.db.contacts().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_contact_database_failure_is_500() {
    let (app, state) = setup(None).await;
    state.db.close().await;

    let res = send(&app, form_request("name=Ada&email=ada%40example.com&message=hi")).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text(), SUBMIT_FAILED);
}

// =============================================================================
// Order ledger
// =============================================================================

#[tokio::test]
async fn test_order_crud_round_trip() {
    let (app, _) = setup(None).await;

    // Create
    let res = send(&app, json_request("POST", "/api/orders", &latte_order())).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let created = res.json();
    assert_eq!(created["totalCents"], 1200);
    assert_eq!(created["itemCount"], 3);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["items"].as_array().unwrap().len(), 2);
    let id = created["id"].as_str().unwrap().to_string();

    // Read
    let res = send(&app, get(&format!("/api/orders/{id}"))).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["items"][0]["name"], "Latte");

    // Update
    let res = send(
        &app,
        json_request("PUT", &format!("/api/orders/{id}"), &json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["status"], "completed");

    // List with filter
    let res = send(&app, get("/api/orders?status=completed")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json().as_array().unwrap().len(), 1);

    let res = send(&app, get("/api/orders?status=pending")).await;
    assert_eq!(res.json().as_array().unwrap().len(), 0);

    // Delete
    let res = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/orders/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = send(&app, get(&format!("/api/orders/{id}"))).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["code"], "not_found");
}

#[tokio::test]
async fn test_create_order_rejects_empty_cart() {
    let (app, _) = setup(None).await;

    let res = send(
        &app,
        json_request("POST", "/api/orders", &json!({ "customerName": "Ada", "items": [] })),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["code"], "validation");
}

#[tokio::test]
async fn test_create_order_rejects_malformed_json() {
    let (app, _) = setup(None).await;

    let res = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["code"], "bad_request");
}

#[tokio::test]
async fn test_order_id_must_be_uuid() {
    let (app, _) = setup(None).await;

    let res = send(&app, get("/api/orders/not-a-uuid")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = send(&app, get("/api/orders/550e8400-e29b-41d4-a716-446655440000")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_rejects_unknown_status() {
    let (app, _) = setup(None).await;

    let res = send(&app, get("/api/orders?status=shipped")).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Admin endpoints
// =============================================================================

#[tokio::test]
async fn test_stats_require_token() {
    let (app, _) = setup(Some(TOKEN)).await;

    assert_eq!(send(&app, get("/api/stats")).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        send(&app, get_with_bearer("/api/stats", "wrong")).await.status,
        StatusCode::UNAUTHORIZED
    );

    let res = send(&app, get_with_bearer("/api/stats", TOKEN)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["orderCount"], 0);

    let res = send(&app, get(&format!("/api/stats?token={TOKEN}"))).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_query_token_with_reserved_characters() {
    let (app, _) = setup(Some("a+b&c%d")).await;

    let res = send(&app, get("/api/stats?token=a%2Bb%26c%25d")).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = send(&app, get("/api/stats?token=a+b%26c%25d")).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = send(&app, get_with_bearer("/api/stats", "a+b&c%d")).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_locked_without_configured_token() {
    let (app, _) = setup(None).await;

    let res = send(&app, get_with_bearer("/api/dashboard", TOKEN)).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.json()["code"], "unauthorized");
}

#[tokio::test]
async fn test_dashboard_shows_recent_activity() {
    let (app, _) = setup(Some(TOKEN)).await;

    send(&app, json_request("POST", "/api/orders", &latte_order())).await;
    send(&app, form_request("name=Ada&email=ada%40example.com&message=hi")).await;

    let res = send(&app, get_with_bearer("/api/dashboard", TOKEN)).await;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json();
    assert_eq!(body["stats"]["orderCount"], 1);
    assert_eq!(body["stats"]["pendingCount"], 1);
    assert_eq!(body["stats"]["revenueCents"], 1200);
    assert_eq!(body["stats"]["contactCount"], 1);
    assert_eq!(body["recentContacts"][0]["name"], "Ada");
    assert_eq!(body["recentOrders"][0]["customerName"], "Ada");
}
