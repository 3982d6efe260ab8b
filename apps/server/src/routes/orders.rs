//! Order ledger route handlers.
//!
//! The checkout page forwards the cart it read from `demoCart` as the
//! order's `items`. Totals are recomputed here from the lines; nothing the
//! client says about money is stored except unit prices.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use latte_core::validation::{validate_new_order, validate_order_update, validate_uuid};
use latte_core::{NewOrder, Order, OrderStatus, OrderUpdate, OrderWithItems};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query string of `GET /api/orders`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// `pending`, `preparing`, `completed` or `cancelled`. Empty means all.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ListParams {
    fn status(&self) -> ApiResult<Option<OrderStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => Ok(Some(s.parse::<OrderStatus>()?)),
        }
    }
}

/// Turns a JSON body rejection into the API's error shape.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// List orders, newest first.
///
/// GET /api/orders?status=&limit=
#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Order>>> {
    let status = params.status()?;
    let orders = state.db.orders().list(status, params.limit.unwrap_or(0)).await?;

    Ok(Json(orders))
}

/// Create an order.
///
/// POST /api/orders
#[instrument(skip(state, body))]
pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<NewOrder>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OrderWithItems>)> {
    let input = json_body(body)?;
    validate_new_order(&input)?;

    let created = state.db.orders().create(&input).await?;
    tracing::info!(
        id = %created.order.id,
        total_cents = created.order.total_cents,
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/orders/{id}
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderWithItems>> {
    validate_uuid(&id)?;

    let order = state.db.orders().get_with_items(&id).await?;

    order
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {id}")))
}

/// PUT /api/orders/{id}
#[instrument(skip(state, body))]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<OrderUpdate>, JsonRejection>,
) -> ApiResult<Json<Order>> {
    validate_uuid(&id)?;
    let update = json_body(body)?;
    validate_order_update(&update)?;

    let order = state.db.orders().update(&id, &update).await?;
    tracing::info!(id = %order.id, status = %order.status, "Order updated");

    Ok(Json(order))
}

/// DELETE /api/orders/{id}
#[instrument(skip(state))]
pub async fn delete_order(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    validate_uuid(&id)?;

    state.db.orders().delete(&id).await?;
    tracing::info!(id = %id, "Order deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_status() {
        let params = ListParams::default();
        assert_eq!(params.status().unwrap(), None);

        let params = ListParams {
            status: Some("Pending".to_string()),
            limit: None,
        };
        assert_eq!(params.status().unwrap(), Some(OrderStatus::Pending));

        let params = ListParams {
            status: Some("lost".to_string()),
            limit: None,
        };
        assert!(matches!(params.status(), Err(ApiError::Validation(_))));
    }
}
