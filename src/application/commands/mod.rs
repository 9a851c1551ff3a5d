//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：生成故事、朗读文本

mod narrate_commands;
mod story_commands;

pub mod handlers;

pub use narrate_commands::*;
pub use story_commands::*;
