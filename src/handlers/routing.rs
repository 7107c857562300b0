// POST /routing/route handler

use warp::http::StatusCode;

use crate::db::Database;
use crate::error::ApiError;
use crate::routing::{RoutingOrchestrator, RoutingRequest};

pub async fn route_handler(
    request: RoutingRequest,
    db: Database,
) -> Result<impl warp::Reply, warp::Rejection> {
    let orchestrator = RoutingOrchestrator::from_database(&db);
    let decision = orchestrator
        .route(&request.prompt, request.assistant_id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(warp::reply::with_status(
        warp::reply::json(&decision),
        StatusCode::OK,
    ))
}
