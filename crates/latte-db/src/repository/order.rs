//! # Order Repository
//!
//! The order ledger: orders placed from the checkout page and their lines.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE                                                              │
//! │     └── create(NewOrder) → Order { status: Pending }                    │
//! │         (order row + all lines in ONE transaction,                      │
//! │          totals recomputed here, never trusted from the client)         │
//! │                                                                         │
//! │  2. UPDATE                                                              │
//! │     └── update(id, { status: preparing })                               │
//! │     └── update(id, { status: completed })                               │
//! │                                                                         │
//! │  3. (OPTIONAL) CANCEL / DELETE                                          │
//! │     └── update(id, { status: cancelled }) → excluded from revenue       │
//! │     └── delete(id) → row and lines removed (ON DELETE CASCADE)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::clamp_limit;
use latte_core::{
    CheckoutLine, Money, NewOrder, Order, OrderItem, OrderStats, OrderStatus, OrderUpdate,
    OrderWithItems,
};

/// Repository for order ledger operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Writes an order and its lines.
    ///
    /// ## Snapshot Pattern
    /// Each checkout line is copied into `order_items` as-is (name, unit
    /// price, image). The order total is the sum of the line totals computed
    /// here in integer cents.
    ///
    /// Input is expected to have passed `validate_new_order`.
    pub async fn create(&self, input: &NewOrder) -> DbResult<OrderWithItems> {
        let now = Utc::now();
        let order_id = Uuid::new_v4().to_string();

        let items: Vec<OrderItem> = input
            .items
            .iter()
            .map(|line| order_item(&order_id, line))
            .collect();

        let total: Money = input.items.iter().map(CheckoutLine::subtotal).sum();
        let item_count: i64 = items.iter().map(|i| i.quantity).sum();

        let order = Order {
            id: order_id,
            customer_name: input.customer_name.trim().to_string(),
            customer_email: non_blank(input.customer_email.as_deref()),
            status: OrderStatus::Pending,
            notes: non_blank(input.notes.as_deref()),
            total_cents: total.cents(),
            item_count,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %order.id, total_cents = order.total_cents, lines = items.len(), "Creating order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_name, customer_email, status, notes,
                total_cents, item_count, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(order.status)
        .bind(&order.notes)
        .bind(order.total_cents)
        .bind(order.item_count)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, position, name,
                    unit_price_cents, quantity, line_total_cents, image_url
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(position as i64)
            .bind(&item.name)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(item.line_total_cents)
            .bind(&item.image_url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(OrderWithItems { order, items })
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, customer_name, customer_email, status, notes,
                total_cents, item_count, created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets the lines of an order in checkout order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT
                id, order_id, name,
                unit_price_cents, quantity, line_total_cents, image_url
            FROM order_items
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Order plus lines, or `None` if the order doesn't exist.
    pub async fn get_with_items(&self, id: &str) -> DbResult<Option<OrderWithItems>> {
        let Some(order) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let items = self.get_items(&order.id).await?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// Lists orders newest first, optionally filtered by status.
    ///
    /// `limit` is clamped to `1..=200`; zero or negative means the default.
    pub async fn list(&self, status: Option<OrderStatus>, limit: i64) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, customer_name, customer_email, status, notes,
                total_cents, item_count, created_at, updated_at
            FROM orders
            WHERE ?1 IS NULL OR status = ?1
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(status)
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Applies a partial update and returns the updated order.
    ///
    /// Absent fields are left unchanged. Blank notes clear the notes.
    ///
    /// ## Errors
    /// - [`DbError::NotFound`] if no order has this id
    pub async fn update(&self, id: &str, update: &OrderUpdate) -> DbResult<Order> {
        let mut order = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))?;

        if let Some(status) = update.status {
            order.status = status;
        }
        if let Some(name) = update.customer_name.as_deref() {
            order.customer_name = name.trim().to_string();
        }
        if update.notes.is_some() {
            order.notes = non_blank(update.notes.as_deref());
        }
        order.updated_at = Utc::now();

        debug!(id = %order.id, status = %order.status, "Updating order");

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = ?2,
                customer_name = ?3,
                notes = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&order.id)
        .bind(order.status)
        .bind(&order.customer_name)
        .bind(&order.notes)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        // Deleted between the read and the write
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(order)
    }

    /// Deletes an order and its lines.
    ///
    /// ## Errors
    /// - [`DbError::NotFound`] if no order has this id
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Dashboard figures. Cancelled orders are excluded from revenue.
    pub async fn stats(&self) -> DbResult<OrderStats> {
        let (order_count, pending_count, revenue_cents, contact_count): (i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    COUNT(*),
                    COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN status != 'cancelled' THEN total_cents ELSE 0 END), 0),
                    (SELECT COUNT(*) FROM contact_messages)
                FROM orders
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(OrderStats {
            order_count,
            pending_count,
            revenue_cents,
            contact_count,
        })
    }
}

fn order_item(order_id: &str, line: &CheckoutLine) -> OrderItem {
    OrderItem {
        id: Uuid::new_v4().to_string(),
        order_id: order_id.to_string(),
        name: line.name.trim().to_string(),
        unit_price_cents: line.unit_price.cents(),
        quantity: i64::from(line.quantity),
        line_total_cents: line.subtotal().cents(),
        image_url: line.image_url.clone(),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================
