//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                  - index.html from STATIC_DIR, or a banner
//! GET    /health            - Health check
//!
//! # Contact form (urlencoded, browser redirects)
//! POST   /submit-contact    - Store a message, 303 to /?status=success#contact
//!
//! # Order ledger (JSON)
//! GET    /api/orders        - List orders (?status=&limit=)
//! POST   /api/orders        - Create an order from checkout lines
//! GET    /api/orders/{id}   - Order with its lines
//! PUT    /api/orders/{id}   - Update status / customer name / notes
//! DELETE /api/orders/{id}   - Delete an order
//!
//! # Admin (ADMIN_TOKEN as Bearer header or ?token=)
//! GET    /api/stats         - Counts and revenue
//! GET    /api/dashboard     - Stats plus recent messages and orders
//!
//! *                         - Static files from STATIC_DIR
//! ```

pub mod admin;
pub mod contact;
pub mod orders;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::debug;

use crate::state::AppState;

/// Plain-text banner for `GET /` when there is no front-end to serve.
pub const BANNER: &str = "Server running for Louvre & Latte.";

/// Order ledger and admin routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/api/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/api/stats", get(admin::stats))
        .route("/api/dashboard", get(admin::dashboard))
}

/// Top-level routes (everything except the static fallback).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/submit-contact", post(contact::submit_contact))
        .merge(api_routes())
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Response {
    let index = state.config.static_dir.join("index.html");

    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            debug!(path = %index.display(), error = %err, "No index page, serving banner");
            BANNER.into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "connected",
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: "unavailable",
            }),
        )
    }
}
