//! Health Handlers

use axum::Json;
use serde::Serialize;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "AI Story Teller",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 根路径响应（未启用前端页面时）
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AI Story Teller API",
        version: env!("CARGO_PKG_VERSION"),
    })
}
