//! Story Commands

use crate::domain::story::Language;

/// 生成故事命令
#[derive(Debug, Clone)]
pub struct GenerateStory {
    pub character: Option<String>,
    pub theme: Option<String>,
    /// 时长（分钟），未经校验
    pub duration: i64,
    pub language: Language,
}
