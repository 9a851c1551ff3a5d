//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    AudioStoragePort, GenerateStoryHandler, GetAudioHandler, NarrateTextHandler,
    NarrationService, StoryGenerator,
};
use crate::config::StoryConfig;

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub generate_story_handler: GenerateStoryHandler,
    pub narrate_handler: NarrateTextHandler,

    // ========== Query Handlers ==========
    pub get_audio_handler: GetAudioHandler,

    /// 请求未指定时长时使用
    pub default_duration: i64,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        story_generator: Arc<StoryGenerator>,
        narration: Arc<NarrationService>,
        storage: Arc<dyn AudioStoragePort>,
        story_config: StoryConfig,
    ) -> Self {
        Self {
            generate_story_handler: GenerateStoryHandler::new(
                story_generator,
                narration.clone(),
                story_config.clone(),
            ),
            narrate_handler: NarrateTextHandler::new(narration),

            get_audio_handler: GetAudioHandler::new(storage),

            default_duration: story_config.default_duration,
        }
    }
}
