// Flat /messages handlers

use uuid::Uuid;
use warp::http::StatusCode;

use super::conversations::CONVERSATION_NOT_FOUND;
use crate::db::Database;
use crate::error::ApiError;
use crate::models::{FlatMessageCreate, MessagePage};

/// POST /messages with the conversation named in the body
pub async fn create_message_handler(
    create: FlatMessageCreate,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    if !db.conversation_exists(create.conversation_id).await? {
        return Err(ApiError::not_found(CONVERSATION_NOT_FOUND).into());
    }
    if create.message.content.is_empty() {
        return Err(ApiError::BadRequest("content is required".to_string()).into());
    }

    let message = db
        .create_message(create.conversation_id, &create.message)
        .await?;

    Ok(warp::reply::with_status(
        warp::reply::json(&message),
        StatusCode::CREATED,
    ))
}

/// GET /messages/by-conversation/{id}; an unknown conversation lists nothing
pub async fn list_messages_by_conversation_handler(
    conversation_id: Uuid,
    page: MessagePage,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    let page = page.pagination();
    page.validate()?;
    let messages = db.list_messages(conversation_id, page).await?;

    Ok(warp::reply::with_status(
        warp::reply::json(&messages),
        StatusCode::OK,
    ))
}
