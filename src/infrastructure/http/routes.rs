//! HTTP Routes
//!
//! API Endpoints:
//! - /health              GET   健康检查
//! - /generate-story      POST  生成故事并朗读
//! - /narrate             POST  朗读任意文本
//! - /audio/:filename     GET   获取生成的音频

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有 API 路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate-story", post(handlers::generate_story))
        .route("/narrate", post(handlers::narrate))
        .route("/audio/:filename", get(handlers::get_audio))
}
