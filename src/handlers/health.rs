// GET /health handler

use serde_json::json;
use std::convert::Infallible;
use warp::http::StatusCode;

pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "status": "healthy" })),
        StatusCode::OK,
    ))
}
