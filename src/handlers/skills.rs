// /assistants/{id}/skills handlers

use tracing::info;
use uuid::Uuid;
use warp::http::StatusCode;

use super::assistants::ASSISTANT_NOT_FOUND;
use crate::db::Database;
use crate::error::ApiError;
use crate::models::AssistantSkillUpdate;

async fn require_assistant(db: &Database, assistant_id: Uuid) -> Result<(), warp::Rejection> {
    match db.get_assistant(assistant_id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::not_found(ASSISTANT_NOT_FOUND).into()),
    }
}

/// Enabled skills of the assistant, by priority
pub async fn list_assistant_skills_handler(
    assistant_id: Uuid,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    require_assistant(&db, assistant_id).await?;
    let skills = db.list_enabled_skills(assistant_id).await?;

    Ok(warp::reply::with_status(
        warp::reply::json(&skills),
        StatusCode::OK,
    ))
}

pub async fn put_assistant_skill_handler(
    assistant_id: Uuid,
    skill_id: Uuid,
    update: AssistantSkillUpdate,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    require_assistant(&db, assistant_id).await?;
    if db.get_skill_definition(skill_id).await?.is_none() {
        return Err(ApiError::not_found("Skill not found").into());
    }

    let link = db
        .upsert_assistant_skill(assistant_id, skill_id, &update)
        .await?;
    info!(%assistant_id, %skill_id, enabled = link.is_enabled, "assistant skill set");

    Ok(warp::reply::with_status(
        warp::reply::json(&link),
        StatusCode::OK,
    ))
}

pub async fn delete_assistant_skill_handler(
    assistant_id: Uuid,
    skill_id: Uuid,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    require_assistant(&db, assistant_id).await?;
    if !db.remove_assistant_skill(assistant_id, skill_id).await? {
        return Err(ApiError::not_found("Skill not attached to assistant").into());
    }
    info!(%assistant_id, %skill_id, "assistant skill removed");

    Ok(warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT))
}
