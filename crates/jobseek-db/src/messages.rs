//! Database operations for the `messages` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `messages` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub content: String,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub job_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One conversation partner, with the context of their latest message.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactRow {
    pub contact_id: Uuid,
    pub full_name: Option<String>,
    pub job_id: Option<Uuid>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub work_type: Option<String>,
    pub last_message_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Stores a message and returns the inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn insert_message(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
    content: &str,
    job_id: Option<Uuid>,
) -> Result<MessageRow, DbError> {
    let row = sqlx::query_as::<_, MessageRow>(
        "INSERT INTO messages (content, sender_id, receiver_id, job_id) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, content, sender_id, receiver_id, job_id, read, created_at, updated_at",
    )
    .bind(content)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(job_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Returns the full conversation between two users, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_conversation(
    pool: &PgPool,
    user_id: Uuid,
    partner_id: Uuid,
) -> Result<Vec<MessageRow>, DbError> {
    let rows = sqlx::query_as::<_, MessageRow>(
        "SELECT id, content, sender_id, receiver_id, job_id, read, created_at, updated_at \
         FROM messages \
         WHERE (sender_id = $1 AND receiver_id = $2) \
            OR (sender_id = $2 AND receiver_id = $1) \
         ORDER BY created_at",
    )
    .bind(user_id)
    .bind(partner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// True if any message has been exchanged between the two users, in either
/// direction. Starting a chat only composes an opening message when this is
/// false.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn conversation_exists(
    pool: &PgPool,
    user_id: Uuid,
    partner_id: Uuid,
) -> Result<bool, DbError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS ( \
            SELECT 1 FROM messages \
            WHERE (sender_id = $1 AND receiver_id = $2) \
               OR (sender_id = $2 AND receiver_id = $1) \
         )",
    )
    .bind(user_id)
    .bind(partner_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Returns the user's conversation partners, most recent traffic first.
///
/// Each partner carries their profile name and the job referenced by the
/// newest message of that conversation, when there is one.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_contacts(pool: &PgPool, user_id: Uuid) -> Result<Vec<ContactRow>, DbError> {
    let rows = sqlx::query_as::<_, ContactRow>(
        "SELECT c.contact_id, c.full_name, c.job_id, c.position, c.company_name, c.work_type, \
                c.last_message_at \
         FROM ( \
            SELECT DISTINCT ON (t.contact_id) \
                   t.contact_id, \
                   p.full_name, \
                   t.job_id, \
                   j.position, \
                   j.company_name, \
                   j.work_type, \
                   t.created_at AS last_message_at \
            FROM ( \
                SELECT CASE WHEN sender_id = $1 THEN receiver_id ELSE sender_id END AS contact_id, \
                       job_id, created_at \
                FROM messages \
                WHERE sender_id = $1 OR receiver_id = $1 \
            ) t \
            LEFT JOIN profiles p ON p.id = t.contact_id \
            LEFT JOIN jobs j ON j.id = t.job_id \
            ORDER BY t.contact_id, t.created_at DESC \
         ) c \
         ORDER BY c.last_message_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Marks every message the partner sent to the reader as read.
///
/// Returns the number of messages updated.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn mark_conversation_read(
    pool: &PgPool,
    reader_id: Uuid,
    partner_id: Uuid,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        "UPDATE messages \
         SET read = true, updated_at = NOW() \
         WHERE receiver_id = $1 AND sender_id = $2 AND read = false",
    )
    .bind(reader_id)
    .bind(partner_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Counts unread messages addressed to the user, across all conversations.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_unread(pool: &PgPool, user_id: Uuid) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND read = false",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
