//! 测试用的端口实现与模拟服务器

use async_trait::async_trait;
use axum::Router;
use std::path::Path;
use std::sync::Mutex;

use crate::application::ports::{
    CompletionRequest, GenerationError, LocalSpeechEnginePort, LocalSynthesisRequest,
    SpeechSynthesisPort, SynthesisOutput, SynthesisRequest, TextGenerationPort, TtsError,
};
use crate::domain::narration::{AudioFormat, Voice};

/// 在随机端口启动 axum 服务，返回 `http://127.0.0.1:port`
pub async fn spawn_mock_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// 返回固定文本的文本生成服务
pub struct FakeTextGenerator {
    reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeTextGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 始终超时
    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationPort for FakeTextGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().ok_or(GenerationError::Timeout)
    }
}

/// 返回固定 MP3 字节的云端 TTS
pub struct FakeSpeechClient {
    fail: bool,
}

impl FakeSpeechClient {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl SpeechSynthesisPort for FakeSpeechClient {
    async fn synthesize(&self, _request: SynthesisRequest) -> Result<SynthesisOutput, TtsError> {
        if self.fail {
            return Err(TtsError::ServiceError("HTTP 503: unavailable".to_string()));
        }
        Ok(SynthesisOutput {
            audio_data: b"ID3fake-mp3".to_vec(),
            format: AudioFormat::Mp3,
        })
    }
}

/// 记录请求并写入固定 WAV 内容的本地引擎
pub struct FakeLocalEngine {
    voices: Vec<Voice>,
    fail: bool,
    requests: Mutex<Vec<LocalSynthesisRequest>>,
}

impl FakeLocalEngine {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 写入半个文件后失败
    pub fn failing() -> Self {
        Self {
            voices: Vec::new(),
            fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LocalSynthesisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocalSpeechEnginePort for FakeLocalEngine {
    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        Ok(self.voices.clone())
    }

    async fn synthesize_to_file(
        &self,
        request: LocalSynthesisRequest,
        output: &Path,
    ) -> Result<(), TtsError> {
        self.requests.lock().unwrap().push(request);
        if self.fail {
            tokio::fs::write(output, b"RI").await.unwrap();
            return Err(TtsError::EngineFailed("crashed mid-write".to_string()));
        }
        tokio::fs::write(output, b"RIFFfake-wav")
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))
    }
}
