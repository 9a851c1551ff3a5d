//! Storyteller - AI 故事朗读服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 输入校验、提示词构建、文本清理
//! - Narration Context: 音频文件命名、音色选择、时长估算
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextGeneration, SpeechSynthesis, LocalSpeechEngine, AudioStorage）
//! - Services: StoryGenerator, NarrationService
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: OpenAI Client, Google TTS Client, eSpeak Engine, File Storage

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod testing;

pub use config::{load_config, AppConfig};
