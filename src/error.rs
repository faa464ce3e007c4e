use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 请求参数错误，Display 即返回给客户端的 error_msg
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed {0}")]
    MissingField(&'static str),
    #[error("malformed {0}")]
    MalformedField(&'static str),
}

/// 会话存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Backend(#[from] redis::RedisError),
    #[error("failed to decode session: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum GeoSpeedError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GeoSpeedError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GeoSpeedError::Validation(_) => StatusCode::BAD_REQUEST,
            GeoSpeedError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            GeoSpeedError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error_msg: String,
}

impl IntoResponse for GeoSpeedError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_msg = match self {
            GeoSpeedError::Validation(err) => err.to_string(),
            GeoSpeedError::SessionNotFound(_) => "session not found".to_string(),
            // 不向客户端暴露存储细节
            GeoSpeedError::Store(_) => "session store unavailable".to_string(),
        };

        (status, Json(ErrorResponse { error_msg })).into_response()
    }
}
