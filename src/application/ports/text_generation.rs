//! Text Generation Port - 文本生成服务抽象
//!
//! 定义对外部对话补全服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider returned no valid response")]
    EmptyResponse,
}

/// 对话补全请求
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// 系统指令
    pub system: String,
    /// 用户提示词
    pub prompt: String,
}

/// Text Generation Port
#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// 提交提示词，返回生成的原始文本（未清理）
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError>;
}
