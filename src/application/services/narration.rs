//! Narration Service - 朗读服务
//!
//! 先尝试主用云端 TTS，失败后改用本地备用引擎；
//! 每次调用生成一个新的唯一文件，并按字数估算时长。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStoragePort, CleanupReport, LocalSpeechEnginePort, LocalSynthesisRequest,
    SpeechSynthesisPort, SynthesisRequest, TtsError,
};
use crate::config::{FallbackTtsConfig, StoryConfig};
use crate::domain::narration::{estimate_duration_seconds, select_voice, AudioFileName, AudioFormat};
use crate::domain::story::Language;

/// 生成的音频
#[derive(Debug, Clone)]
pub struct GeneratedAudio {
    pub file_name: AudioFileName,
    pub path: PathBuf,
    pub format: AudioFormat,
    /// 估算时长（秒）
    pub duration_seconds: f64,
}

impl GeneratedAudio {
    pub fn url(&self) -> String {
        self.file_name.url()
    }
}

/// Narration Service 配置
#[derive(Debug, Clone)]
pub struct NarrationConfig {
    pub story: StoryConfig,
    pub fallback: FallbackTtsConfig,
    /// 默认的文件保留时间
    pub max_file_age: Duration,
}

impl NarrationConfig {
    pub fn new(story: StoryConfig, fallback: FallbackTtsConfig, max_file_age_hours: u64) -> Self {
        Self {
            story,
            fallback,
            max_file_age: Duration::from_secs(max_file_age_hours.saturating_mul(3600)),
        }
    }
}

pub struct NarrationService {
    primary: Arc<dyn SpeechSynthesisPort>,
    fallback: Arc<dyn LocalSpeechEnginePort>,
    storage: Arc<dyn AudioStoragePort>,
    config: NarrationConfig,
}

impl NarrationService {
    pub fn new(
        primary: Arc<dyn SpeechSynthesisPort>,
        fallback: Arc<dyn LocalSpeechEnginePort>,
        storage: Arc<dyn AudioStoragePort>,
        config: NarrationConfig,
    ) -> Self {
        Self {
            primary,
            fallback,
            storage,
            config,
        }
    }

    /// 朗读文本并保存为音频文件
    pub async fn narrate(
        &self,
        text: &str,
        language: Language,
    ) -> Result<GeneratedAudio, ApplicationError> {
        if text.trim().is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }

        let primary_err = match self.narrate_primary(text, language).await {
            Ok(audio) => return Ok(audio),
            Err(e) => e,
        };

        tracing::warn!(
            error = %primary_err,
            language = %language,
            "Primary TTS failed, using local engine"
        );

        match self.narrate_fallback(text, language).await {
            Ok(audio) => Ok(audio),
            Err(fallback_err) => {
                tracing::error!(
                    primary = %primary_err,
                    fallback = %fallback_err,
                    "Both TTS backends failed"
                );
                Err(ApplicationError::NarrationFailure {
                    primary: primary_err,
                    fallback: fallback_err,
                })
            }
        }
    }

    async fn narrate_primary(
        &self,
        text: &str,
        language: Language,
    ) -> Result<GeneratedAudio, TtsError> {
        let output = self
            .primary
            .synthesize(SynthesisRequest {
                text: text.to_string(),
                language,
            })
            .await?;

        if output.audio_data.is_empty() {
            return Err(TtsError::InvalidResponse("empty audio payload".to_string()));
        }

        let file_name = AudioFileName::generate(output.format);
        let path = match self.storage.save(&file_name, &output.audio_data).await {
            Ok(path) => path,
            Err(e) => {
                self.storage.discard(&file_name).await;
                return Err(TtsError::IoError(e.to_string()));
            }
        };

        tracing::info!(
            file = %file_name,
            size = output.audio_data.len(),
            "Narration saved (primary)"
        );

        Ok(self.generated(file_name, path, output.format, text, language))
    }

    async fn narrate_fallback(
        &self,
        text: &str,
        language: Language,
    ) -> Result<GeneratedAudio, TtsError> {
        let voice_id = match language {
            Language::Hindi => {
                let voices = self.fallback.list_voices().await?;
                let voice = select_voice(&voices, language).map(|v| v.id.clone());
                if voice.is_none() {
                    tracing::debug!(
                        available = voices.len(),
                        "No Hindi voice found, using default voice"
                    );
                }
                voice
            }
            Language::English => None,
        };

        let format = self.fallback.format();
        let file_name = AudioFileName::generate(format);
        let path = self.storage.path_for(&file_name);

        let request = LocalSynthesisRequest {
            text: text.to_string(),
            voice_id,
            rate: self.config.fallback.rate,
            volume: self.config.fallback.volume,
        };

        if let Err(e) = self.fallback.synthesize_to_file(request, &path).await {
            self.storage.discard(&file_name).await;
            return Err(e);
        }

        tracing::info!(file = %file_name, "Narration saved (local engine)");

        Ok(self.generated(file_name, path, format, text, language))
    }

    fn generated(
        &self,
        file_name: AudioFileName,
        path: PathBuf,
        format: AudioFormat,
        text: &str,
        language: Language,
    ) -> GeneratedAudio {
        GeneratedAudio {
            file_name,
            path,
            format,
            duration_seconds: estimate_duration_seconds(
                text,
                self.config.story.words_per_minute(language),
            ),
        }
    }

    /// 清理过期文件，`max_age` 为 None 时使用配置的保留时间
    ///
    /// 尽力而为：错误只记录日志
    pub async fn cleanup(&self, max_age: Option<Duration>) -> CleanupReport {
        let max_age = max_age.unwrap_or(self.config.max_file_age);
        match self.storage.cleanup(max_age).await {
            Ok(report) => {
                tracing::info!(
                    scanned = report.scanned,
                    deleted = report.deleted,
                    failed = report.failed,
                    freed_bytes = report.freed_bytes,
                    "Audio cleanup finished"
                );
                report
            }
            Err(e) => {
                tracing::warn!(error = %e, "Audio cleanup failed");
                CleanupReport::default()
            }
        }
    }

    /// 释放本地引擎
    pub async fn shutdown(&self) {
        self.fallback.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::narration::Voice;
    use crate::infrastructure::adapters::FileAudioStorage;
    use crate::testing::{FakeLocalEngine, FakeSpeechClient};
    use std::collections::HashSet;
    use tempfile::tempdir;

    async fn service(
        dir: &std::path::Path,
        primary: FakeSpeechClient,
        fallback: Arc<FakeLocalEngine>,
    ) -> NarrationService {
        let storage = Arc::new(FileAudioStorage::new(dir).await.unwrap());
        NarrationService::new(
            Arc::new(primary),
            fallback,
            storage,
            NarrationConfig::new(StoryConfig::default(), FallbackTtsConfig::default(), 24),
        )
    }

    #[tokio::test]
    async fn test_primary_success_writes_mp3() {
        let dir = tempdir().unwrap();
        let fallback = Arc::new(FakeLocalEngine::new(vec![]));
        let service = service(dir.path(), FakeSpeechClient::ok(), fallback.clone()).await;

        let text = vec!["word"; 150].join(" ");
        let audio = service.narrate(&text, Language::English).await.unwrap();

        assert_eq!(audio.format, AudioFormat::Mp3);
        assert!(audio.path.exists());
        assert!(audio.url().starts_with("/audio/story_"));
        assert!(audio.url().ends_with(".mp3"));
        assert_eq!(audio.duration_seconds, 60.0);
        assert_eq!(std::fs::read(&audio.path).unwrap(), b"ID3fake-mp3");
        assert!(fallback.requests().is_empty());
    }

    #[tokio::test]
    async fn test_filenames_unique_for_identical_input() {
        let dir = tempdir().unwrap();
        let fallback = Arc::new(FakeLocalEngine::new(vec![]));
        let service = service(dir.path(), FakeSpeechClient::ok(), fallback).await;

        let mut names = HashSet::new();
        for _ in 0..20 {
            let audio = service.narrate("same text", Language::English).await.unwrap();
            assert!(names.insert(audio.file_name.to_string()));
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 20);
    }

    #[tokio::test]
    async fn test_fallback_used_when_primary_fails() {
        let dir = tempdir().unwrap();
        let fallback = Arc::new(FakeLocalEngine::new(vec![]));
        let service = service(dir.path(), FakeSpeechClient::failing(), fallback.clone()).await;

        let audio = service.narrate("hello there", Language::English).await.unwrap();

        assert_eq!(audio.format, AudioFormat::Wav);
        assert!(audio.file_name.as_str().ends_with(".wav"));
        assert!(audio.path.exists());

        let requests = fallback.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].voice_id, None);
        assert_eq!(requests[0].rate, 150);
        assert!((requests[0].volume - 0.9).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_fallback_selects_hindi_voice() {
        let dir = tempdir().unwrap();
        let voices = vec![
            Voice {
                id: "en".to_string(),
                name: "English".to_string(),
                language: "en".to_string(),
            },
            Voice {
                id: "hi".to_string(),
                name: "Hindi".to_string(),
                language: "hi".to_string(),
            },
        ];
        let fallback = Arc::new(FakeLocalEngine::new(voices));
        let service = service(dir.path(), FakeSpeechClient::failing(), fallback.clone()).await;

        let audio = service.narrate("नमस्ते दुनिया", Language::Hindi).await.unwrap();

        assert_eq!(fallback.requests()[0].voice_id.as_deref(), Some("hi"));
        // 2 / 120 * 60 = 1.0
        assert_eq!(audio.duration_seconds, 1.0);
    }

    #[tokio::test]
    async fn test_both_backends_fail() {
        let dir = tempdir().unwrap();
        let fallback = Arc::new(FakeLocalEngine::failing());
        let service = service(dir.path(), FakeSpeechClient::failing(), fallback).await;

        let err = service
            .narrate("hello there", Language::English)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NarrationFailure { .. }));
        assert!(err.to_string().contains("primary"));
        // 不留下半成品文件
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let dir = tempdir().unwrap();
        let fallback = Arc::new(FakeLocalEngine::new(vec![]));
        let service = service(dir.path(), FakeSpeechClient::ok(), fallback).await;

        let err = service.narrate("  \n", Language::English).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_cleanup_zero_removes_everything() {
        let dir = tempdir().unwrap();
        let fallback = Arc::new(FakeLocalEngine::new(vec![]));
        let service = service(dir.path(), FakeSpeechClient::ok(), fallback).await;

        for _ in 0..3 {
            service.narrate("some words", Language::English).await.unwrap();
        }

        let kept = service.cleanup(Some(Duration::MAX)).await;
        assert_eq!(kept.deleted, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);

        // 默认 24 小时保留期内不删除
        let kept = service.cleanup(None).await;
        assert_eq!(kept.deleted, 0);

        let report = service.cleanup(Some(Duration::ZERO)).await;
        assert_eq!(report.deleted, 3);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
