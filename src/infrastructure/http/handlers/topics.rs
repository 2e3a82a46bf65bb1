//! Topics Handler
//!
//! 话题目录只读查询，供选择界面使用

use axum::Json;

use super::super::dto::TopicsResponse;
use crate::domain::TOPICS;

/// GET /api/topics
pub async fn list_topics() -> Json<TopicsResponse> {
    Json(TopicsResponse { topics: TOPICS })
}
