//! Audio Queries - 音频查询

use std::path::PathBuf;

/// 获取音频查询
#[derive(Debug, Clone)]
pub struct GetAudioQuery {
    /// 客户端提供的文件名，未经校验
    pub filename: String,
}

/// 获取音频响应
#[derive(Debug, Clone)]
pub enum GetAudioResponse {
    /// 文本文件，直接返回内容
    Text { content: String },
    /// 音频文件，由 HTTP 层流式输出
    Audio {
        path: PathBuf,
        content_type: &'static str,
        size_bytes: u64,
    },
}
