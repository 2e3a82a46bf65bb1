//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

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
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `DAYCAST_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// OpenAI 凭证额外接受裸 `OPENAI_API_KEY` 环境变量，
/// 优先级低于 `DAYCAST_OPENAI__API_KEY`。
///
/// # 环境变量示例
/// - `DAYCAST_SERVER__HOST=127.0.0.1`
/// - `DAYCAST_SERVER__PORT=8080`
/// - `DAYCAST_OPENAI__CHAT_MODEL=gpt-4o-mini`
/// - `DAYCAST_AUDIO__SEPARATOR_PATH=/data/sting.mp3`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("openai.api_key", "")?
        .set_default("openai.base_url", "https://api.openai.com/v1")?
        .set_default("openai.chat_model", "gpt-4o")?
        .set_default("openai.tts_model", "tts-1")?
        .set_default("openai.tts_voice", "onyx")?
        .set_default("openai.tts_speed", 1.0)?
        .set_default("openai.timeout_secs", 120)?
        .set_default("openai.max_retries", 2)?
        .set_default("audio.separator_path", "assets/sting.mp3")?
        .set_default("audio.separator_gain", 0.3)?
        .set_default("audio.max_chunk_chars", 4000)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: DAYCAST_，层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("DAYCAST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // OPENAI_API_KEY 兜底（不覆盖已有配置）
    if app_config.openai.api_key.is_empty() {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            app_config.openai.api_key = key;
        }
    }

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 缺失凭证属于致命配置错误，启动时立即失败，不做重试。
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.openai.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "OpenAI API key is not configured (set OPENAI_API_KEY or openai.api_key)".to_string(),
        ));
    }

    if config.openai.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "OpenAI base URL cannot be empty".to_string(),
        ));
    }

    if config.audio.max_chunk_chars == 0 {
        return Err(ConfigError::ValidationError(
            "audio.max_chunk_chars cannot be 0".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.audio.separator_gain) {
        return Err(ConfigError::ValidationError(format!(
            "audio.separator_gain must be within 0.0..=1.0, got {}",
            config.audio.separator_gain
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，凭证不落日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("OpenAI Base URL: {}", config.openai.base_url);
    tracing::info!("Chat Model: {}", config.openai.chat_model);
    tracing::info!(
        "TTS: {} / voice {} / speed {}",
        config.openai.tts_model,
        config.openai.tts_voice,
        config.openai.tts_speed
    );
    tracing::info!("OpenAI Timeout: {}s", config.openai.timeout_secs);
    tracing::info!("TTS Max Retries: {}", config.openai.max_retries);
    tracing::info!("Separator Asset: {:?}", config.audio.separator_path);
    tracing::info!("Separator Gain: {}", config.audio.separator_gain);
    tracing::info!("Max Chunk Chars: {}", config.audio.max_chunk_chars);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
