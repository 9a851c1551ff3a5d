//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::story::Language;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 故事生成配置（时长、语速）
    #[serde(default)]
    pub story: StoryConfig,

    /// 文本生成服务配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 语音合成配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            story: StoryConfig::default(),
            llm: LlmConfig::default(),
            tts: TtsConfig::default(),
            storage: StorageConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置（前端页面）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录，`index.html` 作为首页
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    false
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("frontend")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5716
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 故事配置
#[derive(Debug, Clone, Deserialize)]
pub struct StoryConfig {
    /// 最短时长（分钟）
    #[serde(default = "default_min_duration")]
    pub min_duration: i64,

    /// 最长时长（分钟）
    #[serde(default = "default_max_duration")]
    pub max_duration: i64,

    /// 请求未指定时长时的默认值（分钟）
    #[serde(default = "default_duration")]
    pub default_duration: i64,

    /// 英语语速（词/分钟）
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// 印地语语速（词/分钟）
    #[serde(default = "default_hindi_words_per_minute")]
    pub hindi_words_per_minute: u32,

    /// 印地语目标字数的额外放大系数
    ///
    /// 与较低的印地语语速叠加生效，待产品确认是否为有意设计
    #[serde(default = "default_hindi_length_multiplier")]
    pub hindi_length_multiplier: f64,
}

fn default_min_duration() -> i64 {
    1
}

fn default_max_duration() -> i64 {
    5
}

fn default_duration() -> i64 {
    2
}

fn default_words_per_minute() -> u32 {
    150
}

fn default_hindi_words_per_minute() -> u32 {
    120
}

fn default_hindi_length_multiplier() -> f64 {
    1.5
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            min_duration: default_min_duration(),
            max_duration: default_max_duration(),
            default_duration: default_duration(),
            words_per_minute: default_words_per_minute(),
            hindi_words_per_minute: default_hindi_words_per_minute(),
            hindi_length_multiplier: default_hindi_length_multiplier(),
        }
    }
}

impl StoryConfig {
    /// 时长是否在允许范围内
    pub fn is_valid_duration(&self, minutes: i64) -> bool {
        (self.min_duration..=self.max_duration).contains(&minutes)
    }

    /// 指定语言的语速（词/分钟）
    pub fn words_per_minute(&self, language: Language) -> u32 {
        match language {
            Language::English => self.words_per_minute,
            Language::Hindi => self.hindi_words_per_minute,
        }
    }
}

/// 文本生成服务配置（OpenAI 兼容接口）
#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    /// API Key，必填
    #[serde(default)]
    pub api_key: String,

    /// 服务基础 URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// 模型名称
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 采样温度
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

// 手动实现 Debug，避免 API Key 出现在日志中
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_llm_temperature() -> f32 {
    0.8
}

fn default_llm_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 云端 TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 本地备用引擎配置
    #[serde(default)]
    pub fallback: FallbackTtsConfig,
}

fn default_tts_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_tts_timeout() -> u64 {
    30
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
            fallback: FallbackTtsConfig::default(),
        }
    }
}

/// 本地备用 TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackTtsConfig {
    /// 引擎可执行文件
    #[serde(default = "default_fallback_program")]
    pub program: String,

    /// 语速（词/分钟）
    #[serde(default = "default_fallback_rate")]
    pub rate: u32,

    /// 音量，取值 0.0 - 1.0
    #[serde(default = "default_fallback_volume")]
    pub volume: f32,
}

fn default_fallback_program() -> String {
    "espeak-ng".to_string()
}

fn default_fallback_rate() -> u32 {
    150
}

fn default_fallback_volume() -> f32 {
    0.9
}

impl Default for FallbackTtsConfig {
    fn default() -> Self {
        Self {
            program: default_fallback_program(),
            rate: default_fallback_rate(),
            volume: default_fallback_volume(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音频存储目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// 音频文件最长保留时间（小时）
    #[serde(default = "default_max_file_age_hours")]
    pub max_file_age_hours: u64,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("audio_files")
}

fn default_max_file_age_hours() -> u64 {
    24
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            max_file_age_hours: default_max_file_age_hours(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
