// HTTP error type and rejection recovery

use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::db;
use crate::models::ValidationError;

/// Error returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        ApiError::NotFound(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<db::Error> for ApiError {
    fn from(err: db::Error) -> Self {
        match err {
            db::Error::NotFoundError(detail) => ApiError::NotFound(detail),
            db::Error::ValidationError(detail) => ApiError::Validation(detail),
            db::Error::ConflictError(detail) => ApiError::Conflict(detail),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<db::Error> for Rejection {
    fn from(err: db::Error) -> Self {
        warp::reject::custom(ApiError::from(err))
    }
}

impl From<ValidationError> for Rejection {
    fn from(err: ValidationError) -> Self {
        warp::reject::custom(ApiError::from(err))
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Turn any rejection into a `{"detail": ...}` response
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, detail) = rejection_status(&err);

    if status.is_server_error() {
        error!(status = status.as_u16(), %detail, "request failed");
    } else if status != StatusCode::NOT_FOUND {
        warn!(status = status.as_u16(), %detail, "request rejected");
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody { detail }),
        status,
    ))
}

fn rejection_status(err: &Rejection) -> (StatusCode, String) {
    if let Some(api) = err.find::<ApiError>() {
        return (api.status(), api.to_string());
    }
    if err.is_not_found() {
        return (StatusCode::NOT_FOUND, "Not Found".to_string());
    }
    if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
    }
    if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
    }
    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed".to_string(),
        );
    }
    if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Payload Too Large".to_string(),
        );
    }
    if err.find::<warp::reject::LengthRequired>().is_some() {
        return (
            StatusCode::LENGTH_REQUIRED,
            "Length Required".to_string(),
        );
    }
    if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported Media Type".to_string(),
        );
    }
    if let Some(e) = err.find::<warp::reject::MissingHeader>() {
        return (StatusCode::BAD_REQUEST, e.to_string());
    }
    if let Some(e) = err.find::<warp::reject::InvalidHeader>() {
        return (StatusCode::BAD_REQUEST, e.to_string());
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Unhandled rejection: {:?}", err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let cases = [
            (db::Error::NotFoundError("x".into()), StatusCode::NOT_FOUND),
            (db::Error::ValidationError("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (db::Error::ConflictError("x".into()), StatusCode::CONFLICT),
            (db::Error::PoolError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (db::Error::DatabaseError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_validation_error_mapping() {
        let err: ApiError = ValidationError::new("name", "must not be empty").into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "name: must not be empty");
    }

    #[test]
    fn test_rejection_status_custom() {
        let rejection = warp::reject::custom(ApiError::not_found("Assistant not found"));
        let (status, detail) = rejection_status(&rejection);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail, "Assistant not found");
    }

    fn lookup(found: bool) -> Result<&'static str, Rejection> {
        let checked: Result<(), ApiError> = if found {
            Ok(())
        } else {
            Err(ApiError::not_found("Conversation not found"))
        };
        checked?;
        Ok("found")
    }

    #[test]
    fn test_question_mark_turns_api_error_into_rejection() {
        assert_eq!(lookup(true).unwrap(), "found");

        let rejection = lookup(false).unwrap_err();
        let api = rejection.find::<ApiError>().unwrap();
        assert_eq!(api.status(), StatusCode::NOT_FOUND);
        assert_eq!(api.to_string(), "Conversation not found");
    }

    #[test]
    fn test_rejection_status_not_found() {
        let (status, _) = rejection_status(&warp::reject::not_found());
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_handle_rejection_body() {
        let rejection = warp::reject::custom(ApiError::BadRequest("content is required".into()));
        let reply = handle_rejection(rejection).await.unwrap();
        let response = reply.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
