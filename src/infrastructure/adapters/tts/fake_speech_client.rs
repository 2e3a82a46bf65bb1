//! Fake Speech Client - 用于测试/离线运行的语音引擎
//!
//! 始终返回固定的音频文件内容，不实际调用 OpenAI

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ports::{SpeechEnginePort, SpeechError};

/// Fake Speech Client 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// 固定返回的音频文件路径
    pub audio_file_path: PathBuf,
    /// 模拟的合成延迟（毫秒）
    pub latency_ms: u64,
}

impl Default for FakeSpeechClientConfig {
    fn default() -> Self {
        Self {
            audio_file_path: PathBuf::from("assets/sample.mp3"),
            latency_ms: 200,
        }
    }
}

/// Fake Speech Client
///
/// 用于测试，始终返回配置的固定音频文件
pub struct FakeSpeechClient {
    config: FakeSpeechClientConfig,
    /// 缓存的音频数据
    audio_data: Vec<u8>,
}

impl FakeSpeechClient {
    pub fn new(config: FakeSpeechClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = std::fs::read(&config.audio_file_path)?;
        tracing::info!(
            path = %config.audio_file_path.display(),
            audio_size = audio_data.len(),
            "FakeSpeechClient initialized"
        );
        Ok(Self { config, audio_data })
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechClient {
    async fn speak(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        tracing::debug!(
            text_chars = text.chars().count(),
            "FakeSpeechClient: returning fixed audio"
        );

        // 模拟合成延迟
        tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;

        Ok(self.audio_data.clone())
    }
}
