//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI 配置（脚本生成 + 语音合成）
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
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
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// OpenAI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API Key（也可通过 OPENAI_API_KEY 环境变量提供）
    #[serde(default)]
    pub api_key: String,

    /// API 基础 URL
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// 脚本生成使用的对话模型
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// 语音合成模型
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// 音色（整集固定，保证音色一致）
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,

    /// 语速
    #[serde(default = "default_tts_speed")]
    pub tts_speed: f32,

    /// 请求超时时间（秒）
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,

    /// 瞬态失败的最大重试次数（按合成块计）
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_voice() -> String {
    "onyx".to_string()
}

fn default_tts_speed() -> f32 {
    1.0
}

fn default_openai_timeout() -> u64 {
    120
}

fn default_max_retries() -> u32 {
    2
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_base_url(),
            chat_model: default_chat_model(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
            tts_speed: default_tts_speed(),
            timeout_secs: default_openai_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

/// 音频配置
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// 分隔音效文件路径（MP3）
    #[serde(default = "default_separator_path")]
    pub separator_path: PathBuf,

    /// 分隔音效增益（0.3 ≈ -10.5 dB，压到人声之下）
    #[serde(default = "default_separator_gain")]
    pub separator_gain: f32,

    /// 单次合成调用的字符上限（上游硬上限 4096，留余量）
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

fn default_separator_path() -> PathBuf {
    PathBuf::from("assets/sting.mp3")
}

fn default_separator_gain() -> f32 {
    0.3
}

fn default_max_chunk_chars() -> usize {
    4000
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            separator_path: default_separator_path(),
            separator_gain: default_separator_gain(),
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
