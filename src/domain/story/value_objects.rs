//! Story Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 故事语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// 请求与响应中使用的语言代码
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
        }
    }

    /// 云端 TTS 使用的语言代码
    pub fn tts_code(&self) -> &'static str {
        self.code()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::English),
            "hi" => Ok(Self::Hindi),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}
