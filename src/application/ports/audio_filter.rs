//! Audio Filter Port - 音频增益滤镜抽象
//!
//! 定义外部音频滤镜（增益调整）的抽象接口，具体实现在
//! infrastructure/adapters 层（ffmpeg 子进程）。

use async_trait::async_trait;
use thiserror::Error;

/// 滤镜错误
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Asset not readable: {0}")]
    AssetNotReadable(String),

    #[error("Filter process failed: {0}")]
    ProcessFailed(String),

    #[error("Filter produced no output")]
    EmptyOutput,
}

/// Audio Filter Port
///
/// 对一段音频整体应用固定增益并重新编码
#[async_trait]
pub trait AudioFilterPort: Send + Sync {
    /// 应用增益（如 0.3 即约 -10.5 dB），返回重编码后的音频字节
    async fn apply_gain(&self, audio: &[u8], gain: f32) -> Result<Vec<u8>, FilterError>;
}
