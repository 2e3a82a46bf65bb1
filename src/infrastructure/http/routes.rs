//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/podcast/generate  POST  生成一集（同步返回 base64 音频 + 文稿）
//! - /api/topics            GET   话题目录
//! - /api/ping              GET   健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/topics", get(handlers::list_topics))
        .route("/podcast/generate", post(handlers::generate_podcast))
}
