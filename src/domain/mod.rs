//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Story Context: 故事请求校验与提示词
//! - Narration Context: 音频命名、音色选择、时长估算

pub mod narration;
pub mod story;

// 共享的文本清理工具
mod text;

pub use text::{clean_story_text, clean_text, word_count};
