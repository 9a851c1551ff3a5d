//! Narrate Commands

use crate::domain::story::Language;

/// 朗读任意文本命令
#[derive(Debug, Clone)]
pub struct NarrateText {
    pub text: String,
    pub language: Language,
}
