//! TTS Engine Ports - 语音合成抽象
//!
//! - `SpeechSynthesisPort`: 主用云端 TTS，返回音频字节
//! - `LocalSpeechEnginePort`: 本地备用引擎，直接写入文件，按需获取、显式释放

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::narration::{AudioFormat, Voice};
use crate::domain::story::Language;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Engine failed: {0}")]
    EngineFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 云端合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: Language,
}

/// 云端合成结果
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub audio_data: Vec<u8>,
    pub format: AudioFormat,
}

/// 主用 TTS Port
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutput, TtsError>;
}

/// 本地合成请求
#[derive(Debug, Clone)]
pub struct LocalSynthesisRequest {
    pub text: String,
    /// 为 None 时使用引擎默认音色
    pub voice_id: Option<String>,
    /// 语速（词/分钟）
    pub rate: u32,
    /// 音量 0.0 - 1.0
    pub volume: f32,
}

/// 本地备用 TTS Port
#[async_trait]
pub trait LocalSpeechEnginePort: Send + Sync {
    /// 引擎输出格式
    fn format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    /// 列出可用音色，首次调用时获取引擎
    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError>;

    /// 合成并写入 `output`
    async fn synthesize_to_file(
        &self,
        request: LocalSynthesisRequest,
        output: &Path,
    ) -> Result<(), TtsError>;

    /// 释放引擎资源（进程退出时调用）
    async fn shutdown(&self) {}
}
