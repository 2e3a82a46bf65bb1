//! HTTP Error Handling
//!
//! 应用层错误到 HTTP 状态码的映射：
//! - 话题非法 → 400
//! - 上游拒绝凭证 → 401
//! - 上游限流 → 429
//! - 其余 → 500
//!
//! 对外只暴露按类别的通用消息，内部细节只进日志。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::EpisodeError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    RateLimited,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Unauthorized => {
                tracing::error!("Upstream rejected credentials");
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid OpenAI API key".to_string(),
                )
            }
            ApiError::RateLimited => {
                tracing::warn!("Upstream rate limited");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "Too many requests. Please try again later.".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                // 内部细节只进日志，不进响应
                tracing::error!(error = %msg, "Podcast generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate podcast. Please try again.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<EpisodeError> for ApiError {
    fn from(e: EpisodeError) -> Self {
        if e.is_unauthorized() {
            return ApiError::Unauthorized;
        }
        if e.is_rate_limited() {
            return ApiError::RateLimited;
        }
        match e {
            EpisodeError::InvalidTopics(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
