//! Story Generator - 故事生成服务
//!
//! 计算目标字数、构建提示词、调用文本生成服务并清理结果

use std::sync::Arc;

use crate::application::ports::{CompletionRequest, GenerationError, TextGenerationPort};
use crate::config::StoryConfig;
use crate::domain::clean_story_text;
use crate::domain::story::{build_story_prompt, target_word_count, Language, SYSTEM_PROMPT};

pub struct StoryGenerator {
    generator: Arc<dyn TextGenerationPort>,
    config: StoryConfig,
}

impl StoryGenerator {
    pub fn new(generator: Arc<dyn TextGenerationPort>, config: StoryConfig) -> Self {
        Self { generator, config }
    }

    /// 目标字数
    pub fn target_word_count(&self, duration_minutes: u32, language: Language) -> u32 {
        target_word_count(
            duration_minutes,
            self.config.words_per_minute(language),
            language,
            self.config.hindi_length_multiplier,
        )
    }

    /// 生成故事文本（已清理）
    pub async fn generate(
        &self,
        character: Option<&str>,
        theme: Option<&str>,
        duration_minutes: u32,
        language: Language,
    ) -> Result<String, GenerationError> {
        let word_count = self.target_word_count(duration_minutes, language);

        tracing::info!(
            character = ?character,
            theme = ?theme,
            duration_minutes,
            language = %language,
            word_count,
            "Generating story"
        );

        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            prompt: build_story_prompt(character, theme, word_count, language),
        };

        let raw = self.generator.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, "Story generation failed");
            e
        })?;

        if raw.trim().is_empty() {
            tracing::error!("Text generation provider returned empty content");
            return Err(GenerationError::EmptyResponse);
        }

        let story = clean_story_text(&raw);

        tracing::info!(story_chars = story.chars().count(), "Story generated");

        Ok(story)
    }
}
