//! Narration Context - 音色选择与时长估算

use serde::{Deserialize, Serialize};

use crate::domain::story::Language;
use crate::domain::text::word_count;

/// 本地引擎可用的音色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// 传给引擎的音色标识
    pub id: String,
    /// 可读名称
    pub name: String,
    /// 语言标签
    pub language: String,
}

/// 印地语音色名称关键字（不区分大小写）
const HINDI_VOICE_KEYWORDS: &[&str] = &["hindi", "indian"];

/// 为指定语言挑选本地音色
///
/// 线性扫描，尽力而为：印地语选第一个名称包含 "hindi" 或 "indian" 的音色，
/// 找不到则返回 `None`，由引擎使用默认音色。其他语言始终使用默认音色。
pub fn select_voice(voices: &[Voice], language: Language) -> Option<&Voice> {
    match language {
        Language::Hindi => voices.iter().find(|voice| {
            let name = voice.name.to_lowercase();
            HINDI_VOICE_KEYWORDS.iter().any(|kw| name.contains(kw))
        }),
        Language::English => None,
    }
}

/// 估算朗读时长（秒），保留两位小数
///
/// 仅按字数估算，不读取实际音频长度
pub fn estimate_duration_seconds(text: &str, words_per_minute: u32) -> f64 {
    if words_per_minute == 0 {
        return 0.0;
    }
    let minutes = word_count(text) as f64 / f64::from(words_per_minute);
    (minutes * 60.0 * 100.0).round() / 100.0
}
