//! # Louvre & Latte Server
//!
//! HTTP server for the restaurant site: the contact form, the order ledger,
//! admin stats, and the static storefront.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Server                                           │
//! │                                                                         │
//! │  Browser ───► axum Router ───► routes::* ───► latte-db ───► SQLite      │
//! │                    │                                                    │
//! │                    ├── TraceLayer (request spans)                       │
//! │                    ├── CorsLayer (any origin)                           │
//! │                    └── ServeDir (STATIC_DIR) for unmatched paths        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    routes::routes()
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
