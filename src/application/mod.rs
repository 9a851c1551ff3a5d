//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextGeneration、SpeechSynthesis、LocalSpeechEngine、AudioStorage）
//! - services: 故事生成与朗读服务
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

// Re-exports
pub use commands::{
    handlers::{GenerateStoryHandler, GenerateStoryResponse, NarrateTextHandler},
    GenerateStory, NarrateText,
};

pub use error::ApplicationError;

pub use ports::{
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    CleanupReport,
    StoredAudio,
    // Text generation
    CompletionRequest,
    GenerationError,
    TextGenerationPort,
    // TTS engines
    LocalSpeechEnginePort,
    LocalSynthesisRequest,
    SpeechSynthesisPort,
    SynthesisOutput,
    SynthesisRequest,
    TtsError,
};

pub use queries::{handlers::GetAudioHandler, GetAudioQuery, GetAudioResponse};

pub use services::{GeneratedAudio, NarrationConfig, NarrationService, StoryGenerator};
