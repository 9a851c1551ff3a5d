//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`STORYTELLER_*`）
//! 2. 配置文件（config.toml）
//! 3. `OPENAI_API_KEY` 环境变量（仅 llm.api_key）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 先读取当前目录下的 `.env`（如果存在），再按优先级合并配置。
///
/// # 环境变量示例
/// - `STORYTELLER_SERVER__PORT=8080`
/// - `STORYTELLER_LLM__API_KEY=sk-...`（或 `OPENAI_API_KEY=sk-...`）
/// - `STORYTELLER_STORAGE__AUDIO_DIR=/data/audio`
/// - `STORYTELLER_TTS__FALLBACK__PROGRAM=espeak`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(ConfigError::LoadError(format!("Failed to read .env: {}", e)));
        }
    }

    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_layers(config_path, Some(environment()))
}

/// 环境变量来源
/// 前缀: STORYTELLER_，层级分隔符: __
fn environment() -> Environment {
    Environment::with_prefix("STORYTELLER")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// 按优先级合并各层配置，`env` 为 None 时不读取任何环境变量
fn load_layers(
    config_path: Option<&Path>,
    env: Option<Environment>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5716)?
        .set_default("story.min_duration", 1)?
        .set_default("story.max_duration", 5)?
        .set_default("story.default_duration", 2)?
        .set_default("llm.base_url", "https://api.openai.com/v1")?
        .set_default("llm.model", "gpt-3.5-turbo")?
        .set_default("llm.timeout_secs", 60)?
        .set_default("tts.url", "https://translate.google.com")?
        .set_default("tts.timeout_secs", 30)?
        .set_default("storage.audio_dir", "audio_files")?
        .set_default("storage.max_file_age_hours", 24)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 兼容通用的 OPENAI_API_KEY
    if env.is_some() {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            builder = builder.set_default("llm.api_key", api_key)?;
        }
    }

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    if let Some(env) = env {
        builder = builder.add_source(env);
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 没有 API Key 时拒绝启动故事生成能力
    if config.llm.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM API key is required. Set OPENAI_API_KEY or STORYTELLER_LLM__API_KEY".to_string(),
        ));
    }

    if config.llm.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM base URL cannot be empty".to_string(),
        ));
    }

    if config.llm.timeout_secs == 0 || config.tts.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Provider timeouts cannot be 0".to_string(),
        ));
    }

    let story = &config.story;
    if story.min_duration > story.max_duration {
        return Err(ConfigError::ValidationError(format!(
            "Min duration {} exceeds max duration {}",
            story.min_duration, story.max_duration
        )));
    }

    if !story.is_valid_duration(story.default_duration) {
        return Err(ConfigError::ValidationError(format!(
            "Default duration {} is outside [{}, {}]",
            story.default_duration, story.min_duration, story.max_duration
        )));
    }

    if story.words_per_minute == 0 || story.hindi_words_per_minute == 0 {
        return Err(ConfigError::ValidationError(
            "Words per minute must be positive".to_string(),
        ));
    }

    if story.hindi_length_multiplier <= 0.0 {
        return Err(ConfigError::ValidationError(
            "Hindi length multiplier must be positive".to_string(),
        ));
    }

    let volume = config.tts.fallback.volume;
    if !(0.0..=1.0).contains(&volume) {
        return Err(ConfigError::ValidationError(format!(
            "Fallback TTS volume {} is outside [0.0, 1.0]",
            volume
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!(
        "Duration: {}-{} min (default {})",
        config.story.min_duration,
        config.story.max_duration,
        config.story.default_duration
    );
    tracing::info!(
        "Words per minute: en={}, hi={} (x{})",
        config.story.words_per_minute,
        config.story.hindi_words_per_minute,
        config.story.hindi_length_multiplier
    );
    tracing::info!("LLM: {} model={}", config.llm.base_url, config.llm.model);
    tracing::info!("LLM Timeout: {}s", config.llm.timeout_secs);
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!(
        "Fallback TTS: {} rate={} volume={}",
        config.tts.fallback.program,
        config.tts.fallback.rate,
        config.tts.fallback.volume
    );
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!("Max Audio Age: {}h", config.storage.max_file_age_hours);
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.llm.api_key = "sk-test".to_string();
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_error_for_missing_api_key() {
        let config = AppConfig::default();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("API key"));

        let mut config = valid_config();
        config.llm.api_key = "   ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_inverted_durations() {
        let mut config = valid_config();
        config.story.min_duration = 6;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_default_duration_out_of_range() {
        let mut config = valid_config();
        config.story.default_duration = 10;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_volume_out_of_range() {
        let mut config = valid_config();
        config.tts.fallback.volume = 1.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = valid_config();
        config.llm.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000

[llm]
api_key = "sk-from-file"
model = "gpt-4o-mini"

[story]
max_duration = 10

[storage]
audio_dir = "/tmp/stories"
max_file_age_hours = 6
"#
        )
        .unwrap();

        let config = load_layers(Some(file.path()), None).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.story.max_duration, 10);
        assert_eq!(config.story.min_duration, 1);
        assert_eq!(config.storage.max_file_age_hours, 6);
        assert_eq!(config.tts.fallback.program, "espeak-ng");
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000

[llm]
api_key = "sk-from-file"
"#
        )
        .unwrap();

        let vars = config::Map::from([
            ("STORYTELLER_SERVER__PORT".to_string(), "7000".to_string()),
            (
                "STORYTELLER_TTS__FALLBACK__PROGRAM".to_string(),
                "espeak".to_string(),
            ),
        ]);
        let env = environment().source(Some(vars));
        let config = load_layers(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.tts.fallback.program, "espeak");
        assert_eq!(config.llm.api_key, "sk-from-file");
    }
}
