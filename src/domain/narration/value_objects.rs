//! Narration Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 生成音频的文件名前缀
pub const AUDIO_FILE_PREFIX: &str = "story";

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioFormat {
    /// 云端 TTS 输出
    Mp3,
    /// 本地备用引擎输出
    Wav,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }
}

/// 音频文件名
///
/// 不变量:
/// - 只包含文件名本身，不含路径分隔符或 `..`
/// - 由 [`AudioFileName::generate`] 生成时以 128 位随机 UUID 保证唯一
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFileName(String);

impl AudioFileName {
    /// 生成新的唯一文件名：`story_<uuid>.<ext>`
    pub fn generate(format: AudioFormat) -> Self {
        Self(format!(
            "{}_{}.{}",
            AUDIO_FILE_PREFIX,
            Uuid::new_v4().simple(),
            format.extension()
        ))
    }

    /// 解析客户端提供的文件名，拒绝任何可能逃逸出音频目录的名字
    pub fn parse(name: &str) -> Option<Self> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0'])
            || name.contains("..");
        if invalid {
            None
        } else {
            Some(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 文件扩展名（小写）
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.0)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// 是否为文本文件
    pub fn is_text(&self) -> bool {
        self.extension().as_deref() == Some("txt")
    }

    /// 对外暴露的相对 URL
    pub fn url(&self) -> String {
        format!("/audio/{}", self.0)
    }
}

impl std::fmt::Display for AudioFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_names_are_unique_and_well_formed() {
        let names: HashSet<String> = (0..1000)
            .map(|_| AudioFileName::generate(AudioFormat::Mp3).to_string())
            .collect();
        assert_eq!(names.len(), 1000);

        for name in &names {
            assert!(name.starts_with("story_"));
            assert!(name.ends_with(".mp3"));
            // story_ + 32 hex + .mp3
            assert_eq!(name.len(), 6 + 32 + 4);
        }
    }

    #[test]
    fn test_parse_rejects_traversal() {
        for bad in ["", ".", "..", "../secret", "a/b.mp3", "a\\b.mp3", "x..mp3"] {
            assert!(AudioFileName::parse(bad).is_none(), "{bad}");
        }
        assert!(AudioFileName::parse("story_abc.wav").is_some());
    }

    #[test]
    fn test_extension_and_url() {
        let name = AudioFileName::parse("notes.TXT").unwrap();
        assert!(name.is_text());
        assert_eq!(name.url(), "/audio/notes.TXT");

        let name = AudioFileName::generate(AudioFormat::Wav);
        assert!(!name.is_text());
        assert_eq!(name.extension().as_deref(), Some("wav"));
    }

    #[test]
    fn test_audio_format_mapping() {
        assert_eq!(AudioFormat::from_extension("MP3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_extension("ogg"), None);
        assert_eq!(AudioFormat::Wav.content_type(), "audio/wav");
        assert_eq!(AudioFormat::Mp3.content_type(), "audio/mpeg");
    }
}
