//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::story::Language;

// ============================================================================
// Story DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    /// 未提供时使用配置的默认时长
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryResponse {
    pub story: String,
    pub duration: i64,
    pub language: Language,
    pub audio_url: String,
}

// ============================================================================
// Narrate DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NarrateRequest {
    pub text: String,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrateResponse {
    pub audio_url: String,
    pub duration_seconds: f64,
}

// ============================================================================
// Audio DTOs
// ============================================================================

/// 文本文件内容
#[derive(Debug, Serialize)]
pub struct TextFileResponse {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl TextFileResponse {
    pub fn new(content: String) -> Self {
        Self {
            content,
            kind: "text",
        }
    }
}
