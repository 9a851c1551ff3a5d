//! Application Services
//!
//! 被命令处理器组合使用的两个核心服务

mod narration;
mod story_generator;

pub use narration::{GeneratedAudio, NarrationConfig, NarrationService};
pub use story_generator::StoryGenerator;
