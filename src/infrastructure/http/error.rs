//! HTTP Error Handling
//!
//! 业务错误映射为真实的 HTTP 状态码，响应体沿用统一的 errno 格式

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    /// 为服务端错误加上操作上下文，客户端错误保持原样
    pub fn context(self, context: &str) -> Self {
        match self {
            ApiError::Internal(msg) => ApiError::Internal(format!("{}: {}", context, msg)),
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let response = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno::NOT_FOUND, error = %msg, "Resource not found");
                ErrorResponse::new(errno::NOT_FOUND, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno::BAD_REQUEST, error = %msg, "Bad request");
                ErrorResponse::new(errno::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, msg)
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::GenerationFailure(_)
            | ApplicationError::NarrationFailure { .. }
            | ApplicationError::StorageError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::GenerationError;

    #[test]
    fn test_application_error_mapping() {
        let err: ApiError = ApplicationError::validation("Text cannot be empty").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = ApplicationError::not_found("Audio file", "x.mp3").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = ApplicationError::GenerationFailure(GenerationError::Timeout).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: ApiError = ApplicationError::StorageError("disk full".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_context_only_prefixes_server_errors() {
        match ApiError::Internal("boom".into()).context("Error generating story") {
            ApiError::Internal(msg) => assert_eq!(msg, "Error generating story: boom"),
            other => panic!("unexpected: {:?}", other),
        }
        match ApiError::BadRequest("bad".into()).context("Error generating story") {
            ApiError::BadRequest(msg) => assert_eq!(msg, "bad"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
