use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::db::error::Result;
use crate::models::{Conversation, ConversationCreate, ConversationUpdate, Pagination};

const CONVERSATION_COLUMNS: &str = "id, user_id, assistant_id, title, conversation_type, status, \
     voice_enabled, voice_id, metadata, started_at, ended_at, created_at, updated_at";

pub(crate) fn parse_conversation_row(row: &Row) -> Result<Conversation> {
    Ok(Conversation {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        assistant_id: row.try_get("assistant_id")?,
        title: row.try_get("title")?,
        conversation_type: row.try_get("conversation_type")?,
        status: row.try_get("status")?,
        voice_enabled: row.try_get("voice_enabled")?,
        voice_id: row.try_get("voice_id")?,
        metadata: row.try_get("metadata")?,
        started_at: row.try_get("started_at")?,
        ended_at: row.try_get("ended_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Insert a conversation for `user_id`, applying the create defaults
pub async fn create_conversation(
    pool: &Pool,
    user_id: Uuid,
    create: &ConversationCreate,
) -> Result<Conversation> {
    let conn = pool.get().await?;
    let sql = format!(
        "INSERT INTO conversations
            (id, user_id, assistant_id, title, conversation_type, status, voice_enabled,
             voice_id, metadata, started_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
         RETURNING {}",
        CONVERSATION_COLUMNS
    );
    let row = conn
        .query_one(
            &sql,
            &[
                &Uuid::new_v4(),
                &user_id,
                &create.assistant_id,
                &create.title,
                &create.conversation_type_or_default(),
                &create.status_or_default(),
                &create.voice_enabled_or_default(),
                &create.voice_id,
                &create.metadata,
            ],
        )
        .await?;
    parse_conversation_row(&row)
}

/// Newest first, optionally restricted to one assistant
pub async fn list_conversations(
    pool: &Pool,
    assistant_id: Option<Uuid>,
    page: Pagination,
) -> Result<Vec<Conversation>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {} FROM conversations
          WHERE ($1::uuid IS NULL OR assistant_id = $1)
          ORDER BY created_at DESC, id DESC
         OFFSET $2 LIMIT $3",
        CONVERSATION_COLUMNS
    );
    let rows = conn
        .query(&sql, &[&assistant_id, &page.skip, &page.limit])
        .await?;
    rows.iter().map(parse_conversation_row).collect()
}

pub async fn get_conversation(pool: &Pool, id: Uuid) -> Result<Option<Conversation>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {} FROM conversations WHERE id = $1",
        CONVERSATION_COLUMNS
    );
    let row = conn.query_opt(&sql, &[&id]).await?;
    row.as_ref().map(parse_conversation_row).transpose()
}

pub async fn conversation_exists(pool: &Pool, id: Uuid) -> Result<bool> {
    let conn = pool.get().await?;
    let row = conn
        .query_opt("SELECT 1 FROM conversations WHERE id = $1", &[&id])
        .await?;
    Ok(row.is_some())
}

pub async fn update_conversation(
    pool: &Pool,
    id: Uuid,
    update: ConversationUpdate,
) -> Result<Option<Conversation>> {
    let mut conn = pool.get().await?;
    let tx = conn.transaction().await?;

    let select = format!(
        "SELECT {} FROM conversations WHERE id = $1 FOR UPDATE",
        CONVERSATION_COLUMNS
    );
    let Some(row) = tx.query_opt(&select, &[&id]).await? else {
        return Ok(None);
    };
    let mut conversation = parse_conversation_row(&row)?;
    conversation.apply(update);

    let sql = format!(
        "UPDATE conversations
            SET title = $2, conversation_type = $3, status = $4, voice_enabled = $5,
                voice_id = $6, metadata = $7, updated_at = now()
          WHERE id = $1
         RETURNING {}",
        CONVERSATION_COLUMNS
    );
    let row = tx
        .query_one(
            &sql,
            &[
                &id,
                &conversation.title,
                &conversation.conversation_type,
                &conversation.status,
                &conversation.voice_enabled,
                &conversation.voice_id,
                &conversation.metadata,
            ],
        )
        .await?;
    let updated = parse_conversation_row(&row)?;
    tx.commit().await?;
    Ok(Some(updated))
}

/// Messages go with the conversation (ON DELETE CASCADE)
pub async fn delete_conversation(pool: &Pool, id: Uuid) -> Result<bool> {
    let conn = pool.get().await?;
    let deleted = conn
        .execute("DELETE FROM conversations WHERE id = $1", &[&id])
        .await?;
    Ok(deleted > 0)
}
