//! Token-gated admin endpoints.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use latte_core::{ContactMessage, Order, OrderStats};

use crate::auth::RequireAdmin;
use crate::error::ApiResult;
use crate::state::AppState;

/// How many messages and orders the dashboard shows.
pub const DASHBOARD_RECENT: i64 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: OrderStats,
    pub recent_contacts: Vec<ContactMessage>,
    pub recent_orders: Vec<Order>,
}

/// GET /api/stats
#[instrument(skip_all)]
pub async fn stats(_admin: RequireAdmin, State(state): State<AppState>) -> ApiResult<Json<OrderStats>> {
    Ok(Json(state.db.orders().stats().await?))
}

/// GET /api/dashboard
#[instrument(skip_all)]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> ApiResult<Json<Dashboard>> {
    let stats = state.db.orders().stats().await?;
    let recent_contacts = state.db.contacts().list_recent(DASHBOARD_RECENT).await?;
    let recent_orders = state.db.orders().list(None, DASHBOARD_RECENT).await?;

    Ok(Json(Dashboard {
        stats,
        recent_contacts,
        recent_orders,
    }))
}
