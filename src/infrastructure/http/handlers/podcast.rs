//! Podcast Handler
//!
//! 一集生成入口。请求体校验（非空、≤6 个话题）在进入管线前
//! 完成，保证零外部调用就能拒绝非法请求。

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::super::dto::{GeneratePodcastRequest, PodcastResponse};
use super::super::error::ApiError;
use super::super::state::AppState;
use crate::application::MAX_TOPICS;

/// POST /api/podcast/generate
pub async fn generate_podcast(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GeneratePodcastRequest>,
) -> Result<Json<PodcastResponse>, ApiError> {
    if request.topics.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one topic is required".to_string(),
        ));
    }
    if request.topics.len() > MAX_TOPICS {
        return Err(ApiError::BadRequest(format!(
            "Maximum {} topics allowed",
            MAX_TOPICS
        )));
    }

    let artifact = state.generate_handler.handle(&request.topics).await?;

    Ok(Json(PodcastResponse::from(artifact)))
}
