//! Audio Storage Port - 出站端口
//!
//! 定义音频文件存储和过期清理的抽象接口。
//! 存储为扁平目录，文件名即唯一标识，没有额外的元数据记录。

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::domain::narration::AudioFileName;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 已存储的文件
#[derive(Debug, Clone)]
pub struct StoredAudio {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// 清理结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// 扫描的文件数量
    pub scanned: u64,
    /// 删除的文件数量
    pub deleted: u64,
    /// 删除失败的文件数量
    pub failed: u64,
    /// 释放的空间（字节）
    pub freed_bytes: u64,
}

/// Audio Storage Port - 出站端口
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 文件在存储目录中的路径
    fn path_for(&self, name: &AudioFileName) -> PathBuf;

    /// 保存音频数据
    async fn save(&self, name: &AudioFileName, data: &[u8]) -> Result<PathBuf, AudioStorageError>;

    /// 尽力删除文件，用于丢弃失败的合成结果
    async fn discard(&self, name: &AudioFileName);

    /// 查找文件，不存在时返回 None
    async fn find(&self, name: &AudioFileName) -> Result<Option<StoredAudio>, AudioStorageError>;

    /// 以 UTF-8 读取文本文件
    async fn read_text(&self, name: &AudioFileName) -> Result<String, AudioStorageError>;

    /// 删除修改时间早于 `max_age` 的所有文件
    ///
    /// 单个文件删除失败只记录日志，不中断清理
    async fn cleanup(&self, max_age: Duration) -> Result<CleanupReport, AudioStorageError>;
}
