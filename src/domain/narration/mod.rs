//! Narration Context - 朗读限界上下文
//!
//! 职责:
//! - 音频格式与文件命名
//! - 本地音色选择
//! - 朗读时长估算

mod value_objects;
mod voice;

pub use value_objects::{AudioFileName, AudioFormat, AUDIO_FILE_PREFIX};
pub use voice::{estimate_duration_seconds, select_voice, Voice};
