//! # Contact Repository
//!
//! Stores contact form submissions. Insert-only from the public site; the
//! dashboard reads the most recent ones.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::clamp_limit;
use latte_core::{ContactMessage, NewContactMessage};

/// Repository for contact message database operations.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    /// Creates a new ContactRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ContactRepository { pool }
    }

    /// Stores a message. Fields are trimmed; validation happens before this.
    pub async fn insert(&self, input: &NewContactMessage) -> DbResult<ContactMessage> {
        let message = ContactMessage {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            message: input.message.trim().to_string(),
            created_at: Utc::now(),
        };

        debug!(id = %message.id, "Inserting contact message");

        sqlx::query(
            r#"
            INSERT INTO contact_messages (id, name, email, message, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(message)
    }

    /// Most recent messages first.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<ContactMessage>> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, message, created_at
            FROM contact_messages
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
