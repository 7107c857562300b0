// GET /users/default handler

use std::sync::Arc;
use tracing::warn;
use warp::http::StatusCode;

use crate::db::{Database, DefaultUserSpec};
use crate::error::ApiError;
use crate::models::DefaultUserResponse;

/// Id of the default user, creating it when the table is empty
pub async fn get_default_user_handler(
    db: Database,
    spec: Arc<DefaultUserSpec>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match db.get_default_user().await? {
        Some(user) => user,
        None => {
            warn!("no users found, ensuring default user");
            db.ensure_default_user(&spec, false).await?;
            db.get_default_user()
                .await?
                .ok_or_else(|| ApiError::Internal("Failed to ensure default user".to_string()))?
        }
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&DefaultUserResponse { id: user.id }),
        StatusCode::OK,
    ))
}
