//! Story Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateStory;
use crate::infrastructure::http::dto::{GenerateStoryRequest, GenerateStoryResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成故事并朗读
pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateStoryRequest>, JsonRejection>,
) -> Result<Json<GenerateStoryResponse>, ApiError> {
    let Json(req) = payload?;

    let command = GenerateStory {
        character: req.character,
        theme: req.theme,
        duration: req.duration.unwrap_or(state.default_duration),
        language: req.language,
    };

    let result = state
        .generate_story_handler
        .handle(command)
        .await
        .map_err(|e| ApiError::from(e).context("Error generating story"))?;

    Ok(Json(GenerateStoryResponse {
        audio_url: result.audio.url(),
        story: result.story,
        duration: result.duration,
        language: result.language,
    }))
}
