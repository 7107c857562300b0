// /assistants handlers

use tracing::info;
use uuid::Uuid;
use warp::http::StatusCode;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::{AssistantCreate, AssistantUpdate, Pagination};

pub const ASSISTANT_NOT_FOUND: &str = "Assistant not found";

/// POST /assistants; the new assistant belongs to the default user
pub async fn create_assistant_handler(
    create: AssistantCreate,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    create.validate()?;

    let owner = db
        .get_default_user()
        .await?
        .ok_or_else(|| ApiError::not_found("Default user not found"))?;

    let assistant = db.create_assistant(owner.id, &create).await?;
    info!(assistant_id = %assistant.id, name = %assistant.name, "assistant created");

    Ok(warp::reply::with_status(
        warp::reply::json(&assistant),
        StatusCode::CREATED,
    ))
}

pub async fn list_assistants_handler(
    page: Pagination,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    page.validate()?;
    let assistants = db.list_assistants(page).await?;

    Ok(warp::reply::with_status(
        warp::reply::json(&assistants),
        StatusCode::OK,
    ))
}

pub async fn get_assistant_handler(
    assistant_id: Uuid,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    let assistant = db
        .get_assistant(assistant_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ASSISTANT_NOT_FOUND))?;

    Ok(warp::reply::with_status(
        warp::reply::json(&assistant),
        StatusCode::OK,
    ))
}

/// PUT /assistants/{id}: partial update, absent fields untouched
pub async fn update_assistant_handler(
    assistant_id: Uuid,
    update: AssistantUpdate,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    update.validate()?;

    let assistant = db
        .update_assistant(assistant_id, update)
        .await?
        .ok_or_else(|| ApiError::not_found(ASSISTANT_NOT_FOUND))?;
    info!(%assistant_id, "assistant updated");

    Ok(warp::reply::with_status(
        warp::reply::json(&assistant),
        StatusCode::OK,
    ))
}

pub async fn delete_assistant_handler(
    assistant_id: Uuid,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    if !db.delete_assistant(assistant_id).await? {
        return Err(ApiError::not_found(ASSISTANT_NOT_FOUND).into());
    }
    info!(%assistant_id, "assistant deleted");

    Ok(warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT))
}
