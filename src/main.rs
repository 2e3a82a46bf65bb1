//! Daycast - 个性化每日播客生成服务

use std::sync::Arc;

use daycast::application::{GenerateEpisodeHandler, SegmentSynthesizer, SeparatorCache, SynthesizerConfig};
use daycast::config::{load_config, print_config};
use daycast::infrastructure::adapters::{
    FfmpegFilter, FfmpegFilterConfig, OpenAiChatClient, OpenAiChatClientConfig,
    OpenAiSpeechClient, OpenAiSpeechClientConfig,
};
use daycast::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    // 缺失凭证在这里立即失败，不进入服务循环
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},daycast={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Daycast - personalized daily podcast generator");
    print_config(&config);

    // 脚本生成客户端
    let script_generator = Arc::new(OpenAiChatClient::new(OpenAiChatClientConfig {
        api_key: config.openai.api_key.clone(),
        base_url: config.openai.base_url.clone(),
        model: config.openai.chat_model.clone(),
        timeout_secs: config.openai.timeout_secs,
    })?);

    // 语音合成客户端（音色/语速整集固定）
    let speech_engine = Arc::new(OpenAiSpeechClient::new(OpenAiSpeechClientConfig {
        api_key: config.openai.api_key.clone(),
        base_url: config.openai.base_url.clone(),
        model: config.openai.tts_model.clone(),
        voice: config.openai.tts_voice.clone(),
        speed: config.openai.tts_speed,
        timeout_secs: config.openai.timeout_secs,
    })?);

    let synthesizer = SegmentSynthesizer::new(
        speech_engine,
        SynthesizerConfig {
            max_chars: config.audio.max_chunk_chars,
            max_retries: config.openai.max_retries,
            retry_backoff_ms: 500,
        },
    );

    // 分隔音效缓存：进程级单例，首个请求触发加载和增益滤镜
    let separator = Arc::new(SeparatorCache::new(
        config.audio.separator_path.clone(),
        config.audio.separator_gain,
        Arc::new(FfmpegFilter::new(FfmpegFilterConfig::default())),
    ));

    let generate_handler = GenerateEpisodeHandler::new(script_generator, synthesizer, separator);

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(generate_handler);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
