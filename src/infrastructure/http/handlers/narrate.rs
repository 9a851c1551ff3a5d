//! Narrate Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::NarrateText;
use crate::infrastructure::http::dto::{NarrateRequest, NarrateResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 朗读任意文本
pub async fn narrate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NarrateRequest>, JsonRejection>,
) -> Result<Json<NarrateResponse>, ApiError> {
    let Json(req) = payload?;

    let audio = state
        .narrate_handler
        .handle(NarrateText {
            text: req.text,
            language: req.language,
        })
        .await
        .map_err(|e| ApiError::from(e).context("Error narrating text"))?;

    Ok(Json(NarrateResponse {
        audio_url: audio.url(),
        duration_seconds: audio.duration_seconds,
    }))
}
