//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{AudioStorageError, GenerationError, TtsError};
use crate::domain::story::StoryValidationError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("{0}")]
    ValidationError(String),

    /// 故事生成失败
    #[error("Story generation failed: {0}")]
    GenerationFailure(#[from] GenerationError),

    /// 主用与备用 TTS 均失败
    #[error("Text-to-speech failed: primary: {primary}; fallback: {fallback}")]
    NarrationFailure { primary: TtsError, fallback: TtsError },

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<StoryValidationError> for ApplicationError {
    fn from(err: StoryValidationError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<AudioStorageError> for ApplicationError {
    fn from(err: AudioStorageError) -> Self {
        match err {
            AudioStorageError::FileNotFound(name) => Self::not_found("Audio file", name),
            other => Self::StorageError(other.to_string()),
        }
    }
}
