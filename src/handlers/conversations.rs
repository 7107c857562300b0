// /conversations handlers

use tracing::info;
use uuid::Uuid;
use warp::http::StatusCode;

use super::assistants::ASSISTANT_NOT_FOUND;
use crate::db::Database;
use crate::error::ApiError;
use crate::models::{ConversationCreate, ConversationFilter, ConversationUpdate, MessageCreate};

pub const CONVERSATION_NOT_FOUND: &str = "Conversation not found";

/// POST /conversations; the owner defaults to the assistant's owner
pub async fn create_conversation_handler(
    create: ConversationCreate,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    create.validate()?;

    let assistant = db
        .get_assistant(create.assistant_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ASSISTANT_NOT_FOUND))?;
    let user_id = create.user_id.unwrap_or(assistant.user_id);

    let conversation = db.create_conversation(user_id, &create).await?;
    info!(conversation_id = %conversation.id, assistant_id = %assistant.id, "conversation created");

    Ok(warp::reply::with_status(
        warp::reply::json(&conversation),
        StatusCode::CREATED,
    ))
}

pub async fn list_conversations_handler(
    filter: ConversationFilter,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    let page = filter.pagination();
    page.validate()?;
    let conversations = db.list_conversations(filter.assistant_id, page).await?;

    Ok(warp::reply::with_status(
        warp::reply::json(&conversations),
        StatusCode::OK,
    ))
}

pub async fn get_conversation_handler(
    conversation_id: Uuid,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    let conversation = db
        .get_conversation(conversation_id)
        .await?
        .ok_or_else(|| ApiError::not_found(CONVERSATION_NOT_FOUND))?;

    Ok(warp::reply::with_status(
        warp::reply::json(&conversation),
        StatusCode::OK,
    ))
}

pub async fn update_conversation_handler(
    conversation_id: Uuid,
    update: ConversationUpdate,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    update.validate()?;

    let conversation = db
        .update_conversation(conversation_id, update)
        .await?
        .ok_or_else(|| ApiError::not_found(CONVERSATION_NOT_FOUND))?;

    Ok(warp::reply::with_status(
        warp::reply::json(&conversation),
        StatusCode::OK,
    ))
}

pub async fn delete_conversation_handler(
    conversation_id: Uuid,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    if !db.delete_conversation(conversation_id).await? {
        return Err(ApiError::not_found(CONVERSATION_NOT_FOUND).into());
    }
    info!(%conversation_id, "conversation deleted");

    Ok(warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT))
}

/// POST /conversations/{id}/messages
pub async fn add_message_handler(
    conversation_id: Uuid,
    create: MessageCreate,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    if !db.conversation_exists(conversation_id).await? {
        return Err(ApiError::not_found(CONVERSATION_NOT_FOUND).into());
    }
    if create.content.is_empty() {
        return Err(ApiError::BadRequest("content is required".to_string()).into());
    }

    let message = db.create_message(conversation_id, &create).await?;

    Ok(warp::reply::with_status(
        warp::reply::json(&message),
        StatusCode::CREATED,
    ))
}

/// GET /conversations/{id}/messages, oldest first
pub async fn list_conversation_messages_handler(
    conversation_id: Uuid,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    if !db.conversation_exists(conversation_id).await? {
        return Err(ApiError::not_found(CONVERSATION_NOT_FOUND).into());
    }
    let messages = db.list_all_messages(conversation_id).await?;

    Ok(warp::reply::with_status(
        warp::reply::json(&messages),
        StatusCode::OK,
    ))
}
