//! OpenAI Speech Client - 调用 Audio Speech 接口合成语音
//!
//! 实现 SpeechEnginePort trait。音色和语速固定持有，
//! 整集所有调用使用同一组参数，保证音色一致。
//!
//! POST {base_url}/audio/speech
//! Request: {"model": "...", "input": "...", "voice": "...", "speed": 1.0}  (JSON)
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechEnginePort, SpeechError};

/// 语音合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
}

/// OpenAI Speech 客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiSpeechClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub voice: String,
    pub speed: f32,
    pub timeout_secs: u64,
}

impl Default for OpenAiSpeechClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "tts-1".to_string(),
            voice: "onyx".to_string(),
            speed: 1.0,
            timeout_secs: 120,
        }
    }
}

/// OpenAI Speech 客户端
pub struct OpenAiSpeechClient {
    client: Client,
    config: OpenAiSpeechClientConfig,
}

impl OpenAiSpeechClient {
    pub fn new(config: OpenAiSpeechClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url)
    }
}

#[async_trait]
impl SpeechEnginePort for OpenAiSpeechClient {
    async fn speak(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let http_request = SpeechHttpRequest {
            model: &self.config.model,
            input: text,
            voice: &self.config.voice,
            speed: self.config.speed,
        };

        tracing::debug!(
            url = %self.speech_url(),
            text_chars = text.chars().count(),
            voice = %self.config.voice,
            "Sending speech synthesis request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.config.api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!("Cannot connect to OpenAI: {}", e))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => return Err(SpeechError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(SpeechError::RateLimited),
            s if !s.is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                return Err(SpeechError::ServiceError(format!(
                    "HTTP {}: {}",
                    status, error_text
                )));
            }
            _ => {}
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Empty audio in response".to_string(),
            ));
        }

        tracing::debug!(audio_size = audio.len(), "Speech synthesis completed");

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = OpenAiSpeechClientConfig::default();
        assert_eq!(config.model, "tts-1");
        assert_eq!(config.voice, "onyx");
        assert_eq!(config.speed, 1.0);
    }
}
