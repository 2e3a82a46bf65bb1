//! Speech Engine Port - 语音合成抽象
//!
//! 定义文本转语音的抽象接口，具体实现在 infrastructure/adapters 层。
//! 一次调用合成一个文本块，长文本的分块和拼接由应用层负责。

use async_trait::async_trait;
use thiserror::Error;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Rate limited by upstream")]
    RateLimited,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl SpeechError {
    /// 是否为值得重试的瞬态错误
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SpeechError::NetworkError(_)
                | SpeechError::Timeout
                | SpeechError::RateLimited
                | SpeechError::ServiceError(_)
        )
    }
}

/// Speech Engine Port
///
/// 外部 TTS 服务的抽象接口。音色、语速等参数由实现持有并在
/// 整集内保持固定，保证音色一致。
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 合成单个文本块，返回帧式容器（MP3）的原始音频字节
    ///
    /// 文本长度应不超过实现方的字符上限；超限块照常发出，
    /// 由上游按自身限制拒绝或截断。
    async fn speak(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}
