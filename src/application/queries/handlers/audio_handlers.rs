//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioStoragePort;
use crate::application::queries::audio_queries::{GetAudioQuery, GetAudioResponse};
use crate::domain::narration::{AudioFileName, AudioFormat};

/// GetAudio Handler - 按文件名在音频目录中查找
pub struct GetAudioHandler {
    storage: Arc<dyn AudioStoragePort>,
}

impl GetAudioHandler {
    pub fn new(storage: Arc<dyn AudioStoragePort>) -> Self {
        Self { storage }
    }

    pub async fn handle(&self, query: GetAudioQuery) -> Result<GetAudioResponse, ApplicationError> {
        let name = AudioFileName::parse(&query.filename)
            .ok_or_else(|| ApplicationError::not_found("Audio file", query.filename.clone()))?;

        let stored = self
            .storage
            .find(&name)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Audio file", query.filename.clone()))?;

        if name.is_text() {
            let content = self.storage.read_text(&name).await?;
            return Ok(GetAudioResponse::Text { content });
        }

        let content_type = name
            .extension()
            .and_then(|ext| AudioFormat::from_extension(&ext))
            .map(|format| format.content_type())
            .unwrap_or("application/octet-stream");

        Ok(GetAudioResponse::Audio {
            path: stored.path,
            content_type,
            size_bytes: stored.size_bytes,
        })
    }
}
