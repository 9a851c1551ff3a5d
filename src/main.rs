//! Storyteller - AI 故事朗读服务
//!
//! 启动顺序：配置 → 日志 → 适配器 → 服务 → 过期音频清理 → HTTP 服务器

use std::sync::Arc;

use storyteller::application::{AudioStoragePort, NarrationConfig, NarrationService, StoryGenerator};
use storyteller::config::{load_config, print_config, LogConfig};
use storyteller::infrastructure::adapters::{
    EspeakEngine, EspeakEngineConfig, FileAudioStorage, GoogleTtsClient, GoogleTtsClientConfig,
    OpenAiClient, OpenAiClientConfig,
};
use storyteller::infrastructure::http::{AppState, HttpServer};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!(
        "{},storyteller={},tower_http=debug",
        log.level, log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Storyteller - AI 故事朗读服务");
    print_config(&config);

    // 音频存储
    let storage: Arc<dyn AudioStoragePort> =
        Arc::new(FileAudioStorage::new(&config.storage.audio_dir).await?);

    // 文本生成
    let llm = Arc::new(OpenAiClient::new(OpenAiClientConfig::from(&config.llm))?);
    let story_generator = Arc::new(StoryGenerator::new(llm, config.story.clone()));

    // 主用云端 TTS + 本地备用引擎（首次使用时获取）
    let primary_tts = Arc::new(GoogleTtsClient::new(
        GoogleTtsClientConfig::new(&config.tts.url).with_timeout(config.tts.timeout_secs),
    )?);
    let fallback_tts = Arc::new(EspeakEngine::new(EspeakEngineConfig {
        program: config.tts.fallback.program.clone(),
    }));

    let narration = Arc::new(NarrationService::new(
        primary_tts,
        fallback_tts,
        storage.clone(),
        NarrationConfig::new(
            config.story.clone(),
            config.tts.fallback.clone(),
            config.storage.max_file_age_hours,
        ),
    ));

    // 启动时清理过期音频
    narration.cleanup(None).await;

    let state = AppState::new(
        story_generator,
        narration.clone(),
        storage,
        config.story.clone(),
    );
    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    narration.shutdown().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}
