use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::db::error::Result;
use crate::models::{Assistant, AssistantCreate, AssistantUpdate, Pagination};

const ASSISTANT_COLUMNS: &str = "id, user_id, name, description, personality_template_id, \
     voice_id, avatar_id, default_llm_model, custom_system_prompt, is_active, is_public, \
     created_at, updated_at";

pub(crate) fn parse_assistant_row(row: &Row) -> Result<Assistant> {
    Ok(Assistant {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        personality_template_id: row.try_get("personality_template_id")?,
        voice_id: row.try_get("voice_id")?,
        avatar_id: row.try_get("avatar_id")?,
        default_llm_model: row.try_get("default_llm_model")?,
        custom_system_prompt: row.try_get("custom_system_prompt")?,
        is_active: row.try_get("is_active")?,
        is_public: row.try_get("is_public")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Insert an already validated assistant owned by `user_id`
pub async fn create_assistant(
    pool: &Pool,
    user_id: Uuid,
    create: &AssistantCreate,
) -> Result<Assistant> {
    let conn = pool.get().await?;
    let sql = format!(
        "INSERT INTO assistants
            (id, user_id, name, description, personality_template_id, voice_id, avatar_id,
             default_llm_model, custom_system_prompt)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING {}",
        ASSISTANT_COLUMNS
    );
    let row = conn
        .query_one(
            &sql,
            &[
                &Uuid::new_v4(),
                &user_id,
                &create.name,
                &create.description,
                &create.personality_template_id,
                &create.voice_id,
                &create.avatar_id,
                &create.default_llm_model,
                &create.custom_system_prompt,
            ],
        )
        .await?;
    parse_assistant_row(&row)
}

pub async fn list_assistants(pool: &Pool, page: Pagination) -> Result<Vec<Assistant>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {} FROM assistants ORDER BY created_at ASC, id ASC OFFSET $1 LIMIT $2",
        ASSISTANT_COLUMNS
    );
    let rows = conn.query(&sql, &[&page.skip, &page.limit]).await?;
    rows.iter().map(parse_assistant_row).collect()
}

pub async fn get_assistant(pool: &Pool, id: Uuid) -> Result<Option<Assistant>> {
    let conn = pool.get().await?;
    let sql = format!("SELECT {} FROM assistants WHERE id = $1", ASSISTANT_COLUMNS);
    let row = conn.query_opt(&sql, &[&id]).await?;
    row.as_ref().map(parse_assistant_row).transpose()
}

/// Read-modify-write under a row lock; `None` when the assistant does not exist
pub async fn update_assistant(
    pool: &Pool,
    id: Uuid,
    update: AssistantUpdate,
) -> Result<Option<Assistant>> {
    let mut conn = pool.get().await?;
    let tx = conn.transaction().await?;

    let select = format!(
        "SELECT {} FROM assistants WHERE id = $1 FOR UPDATE",
        ASSISTANT_COLUMNS
    );
    let Some(row) = tx.query_opt(&select, &[&id]).await? else {
        return Ok(None);
    };
    let mut assistant = parse_assistant_row(&row)?;
    assistant.apply(update);

    let sql = format!(
        "UPDATE assistants
            SET name = $2, description = $3, personality_template_id = $4, voice_id = $5,
                avatar_id = $6, default_llm_model = $7, custom_system_prompt = $8,
                updated_at = now()
          WHERE id = $1
         RETURNING {}",
        ASSISTANT_COLUMNS
    );
    let row = tx
        .query_one(
            &sql,
            &[
                &id,
                &assistant.name,
                &assistant.description,
                &assistant.personality_template_id,
                &assistant.voice_id,
                &assistant.avatar_id,
                &assistant.default_llm_model,
                &assistant.custom_system_prompt,
            ],
        )
        .await?;
    let updated = parse_assistant_row(&row)?;
    tx.commit().await?;
    Ok(Some(updated))
}

/// Returns whether a row was deleted
pub async fn delete_assistant(pool: &Pool, id: Uuid) -> Result<bool> {
    let conn = pool.get().await?;
    let deleted = conn
        .execute("DELETE FROM assistants WHERE id = $1", &[&id])
        .await?;
    Ok(deleted > 0)
}
