use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::db::error::{Error, Result};
use crate::models::{Message, MessageCreate, MessageRole, Pagination};

// role is a PostgreSQL enum; it crosses the wire as text
const MESSAGE_COLUMNS: &str = "id, conversation_id, role::text AS role, content, content_type, \
     parent_id, metadata, created_at";

pub(crate) fn parse_message_row(row: &Row) -> Result<Message> {
    let role: String = row.try_get("role")?;
    let role = role
        .parse::<MessageRole>()
        .map_err(|e| Error::DatabaseError(format!("Invalid role in database: {}", e)))?;

    Ok(Message {
        id: row.try_get("id")?,
        conversation_id: row.try_get("conversation_id")?,
        role,
        content: row.try_get("content")?,
        content_type: row.try_get("content_type")?,
        parent_id: row.try_get("parent_id")?,
        metadata: row.try_get("metadata")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Append a message to a conversation
pub async fn create_message(
    pool: &Pool,
    conversation_id: Uuid,
    create: &MessageCreate,
) -> Result<Message> {
    let conn = pool.get().await?;
    let sql = format!(
        "INSERT INTO messages
            (id, conversation_id, role, content, content_type, parent_id, metadata)
         VALUES ($1, $2, CAST($3::text AS message_role), $4, $5, $6, $7)
         RETURNING {}",
        MESSAGE_COLUMNS
    );
    let row = conn
        .query_one(
            &sql,
            &[
                &Uuid::new_v4(),
                &conversation_id,
                &create.role.as_str(),
                &create.content,
                &create.content_type_or_default(),
                &create.parent_id,
                &create.metadata,
            ],
        )
        .await?;
    parse_message_row(&row)
}

/// Messages of a conversation in the order they were written
pub async fn list_messages(
    pool: &Pool,
    conversation_id: Uuid,
    page: Pagination,
) -> Result<Vec<Message>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {} FROM messages
          WHERE conversation_id = $1
          ORDER BY created_at ASC, id ASC
         OFFSET $2 LIMIT $3",
        MESSAGE_COLUMNS
    );
    let rows = conn
        .query(&sql, &[&conversation_id, &page.skip, &page.limit])
        .await?;
    rows.iter().map(parse_message_row).collect()
}

/// Every message of a conversation, oldest first
pub async fn list_all_messages(pool: &Pool, conversation_id: Uuid) -> Result<Vec<Message>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {} FROM messages
          WHERE conversation_id = $1
          ORDER BY created_at ASC, id ASC",
        MESSAGE_COLUMNS
    );
    let rows = conn.query(&sql, &[&conversation_id]).await?;
    rows.iter().map(parse_message_row).collect()
}
