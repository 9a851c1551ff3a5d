//! Story Command Handlers

use std::sync::Arc;

use crate::application::commands::GenerateStory;
use crate::application::error::ApplicationError;
use crate::application::services::{GeneratedAudio, NarrationService, StoryGenerator};
use crate::config::StoryConfig;
use crate::domain::story::{validate_duration, validate_input, Language};

/// 生成故事响应
#[derive(Debug, Clone)]
pub struct GenerateStoryResponse {
    pub story: String,
    pub duration: i64,
    pub language: Language,
    pub audio: GeneratedAudio,
}

/// GenerateStory Handler
///
/// 校验 → 生成文本 → 朗读，严格顺序执行
pub struct GenerateStoryHandler {
    story_generator: Arc<StoryGenerator>,
    narration: Arc<NarrationService>,
    config: StoryConfig,
}

impl GenerateStoryHandler {
    pub fn new(
        story_generator: Arc<StoryGenerator>,
        narration: Arc<NarrationService>,
        config: StoryConfig,
    ) -> Self {
        Self {
            story_generator,
            narration,
            config,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateStory,
    ) -> Result<GenerateStoryResponse, ApplicationError> {
        validate_duration(
            command.duration,
            self.config.min_duration,
            self.config.max_duration,
        )?;
        validate_input(command.character.as_deref(), command.theme.as_deref())?;

        let duration_minutes = u32::try_from(command.duration)
            .map_err(|_| ApplicationError::validation("Duration must be positive"))?;

        let story = self
            .story_generator
            .generate(
                command.character.as_deref(),
                command.theme.as_deref(),
                duration_minutes,
                command.language,
            )
            .await?;

        let audio = self.narration.narrate(&story, command.language).await?;

        tracing::info!(
            language = %command.language,
            duration = command.duration,
            audio = %audio.file_name,
            "Story generated and narrated"
        );

        Ok(GenerateStoryResponse {
            story,
            duration: command.duration,
            language: command.language,
            audio,
        })
    }
}
