//! Audio Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::fs;
use tokio_util::io::ReaderStream;

use crate::application::{GetAudioQuery, GetAudioResponse};
use crate::infrastructure::http::dto::TextFileResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取生成的音频文件
///
/// `.txt` 文件以 JSON 返回内容，其余文件流式返回
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let result = state
        .get_audio_handler
        .handle(GetAudioQuery {
            filename: filename.clone(),
        })
        .await?;

    let (path, content_type, size_bytes) = match result {
        GetAudioResponse::Text { content } => {
            return Ok(Json(TextFileResponse::new(content)).into_response());
        }
        GetAudioResponse::Audio {
            path,
            content_type,
            size_bytes,
        } => (path, content_type, size_bytes),
    };

    // 查询与打开之间文件可能已被清理
    let file = fs::File::open(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::NotFound(format!("Audio file not found: {}", filename)),
        _ => ApiError::Internal(format!("Failed to open audio file: {}", e)),
    })?;

    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, size_bytes)
        .header(header::CONTENT_DISPOSITION, inline_disposition(&filename))
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// `Content-Disposition` 只允许可见 ASCII，引号与反斜杠替换为 `_`
fn inline_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!("inline; filename=\"{}\"", safe)
}
