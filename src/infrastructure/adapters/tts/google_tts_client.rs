//! Google TTS Client - 调用 Google 翻译的朗读接口
//!
//! 实现 SpeechSynthesisPort trait
//!
//! 外部 TTS API:
//! GET {base_url}/translate_tts?ie=UTF-8&client=tw-ob&tl=en&q=...&total=N&idx=i&textlen=L
//! Response: audio/mpeg binary
//!
//! 接口单次最多接受 100 个字符，长文本按空白切分后逐段请求，MP3 帧直接拼接。

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{SpeechSynthesisPort, SynthesisOutput, SynthesisRequest, TtsError};
use crate::domain::narration::AudioFormat;

/// 单次请求的最大字符数
pub const MAX_CHUNK_CHARS: usize = 100;

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GoogleTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!(
            "{}/translate_tts",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, TtsError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        if bytes.is_empty() {
            return Err(TtsError::InvalidResponse(format!(
                "Empty audio for chunk {}",
                idx
            )));
        }

        Ok(bytes.to_vec())
    }
}

/// 按空白把文本切成不超过 `max_chars` 个字符的片段
///
/// 单词本身超长时强制截断
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[async_trait]
impl SpeechSynthesisPort for GoogleTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutput, TtsError> {
        let chunks = split_text(&request.text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::InvalidResponse("No text to synthesize".to_string()));
        }

        let language = request.language.tts_code();

        tracing::debug!(
            url = %self.tts_url(),
            language,
            chunks = chunks.len(),
            text_len = request.text.len(),
            "Sending TTS requests"
        );

        let mut audio_data = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, chunks.len()).await?;
            audio_data.extend_from_slice(&bytes);
        }

        tracing::info!(
            language,
            chunks = chunks.len(),
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesisOutput {
            audio_data,
            format: AudioFormat::Mp3,
        })
    }
}
