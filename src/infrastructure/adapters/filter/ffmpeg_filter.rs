//! FFmpeg Gain Filter - 通过 ffmpeg 子进程调整音频增益
//!
//! 实现 AudioFilterPort trait。音频走 stdin/stdout 管道，
//! 不落临时文件：
//!
//! ffmpeg -i pipe:0 -filter:a volume={gain} -f mp3 pipe:1

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{AudioFilterPort, FilterError};

/// FFmpeg 滤镜配置
#[derive(Debug, Clone)]
pub struct FfmpegFilterConfig {
    /// ffmpeg 可执行文件（默认依赖 PATH）
    pub ffmpeg_bin: String,
}

impl Default for FfmpegFilterConfig {
    fn default() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
        }
    }
}

/// FFmpeg 增益滤镜
pub struct FfmpegFilter {
    config: FfmpegFilterConfig,
}

impl FfmpegFilter {
    pub fn new(config: FfmpegFilterConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FfmpegFilterConfig::default())
    }
}

#[async_trait]
impl AudioFilterPort for FfmpegFilter {
    async fn apply_gain(&self, audio: &[u8], gain: f32) -> Result<Vec<u8>, FilterError> {
        tracing::debug!(
            input_size = audio.len(),
            gain,
            bin = %self.config.ffmpeg_bin,
            "Applying gain filter"
        );

        let mut child = Command::new(&self.config.ffmpeg_bin)
            .args([
                "-hide_banner",
                "-loglevel",
                "error",
                "-i",
                "pipe:0",
                "-filter:a",
                &format!("volume={}", gain),
                "-f",
                "mp3",
                "pipe:1",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FilterError::ProcessFailed(format!("Failed to spawn ffmpeg: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| FilterError::ProcessFailed("Failed to open ffmpeg stdin".to_string()))?;

        // stdin 写入与 stdout 读取并行，避免管道缓冲互相堵死
        let input = audio.to_vec();
        let writer = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| FilterError::ProcessFailed(format!("ffmpeg did not exit: {}", e)))?;

        if let Ok(Err(e)) = writer.await {
            // 子进程先退出时写端会收到 BrokenPipe，以退出码为准
            tracing::debug!(error = %e, "ffmpeg stdin writer ended early");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FilterError::ProcessFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(FilterError::EmptyOutput);
        }

        tracing::debug!(output_size = output.stdout.len(), "Gain filter applied");

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_process_error() {
        let filter = FfmpegFilter::new(FfmpegFilterConfig {
            ffmpeg_bin: "/nonexistent/ffmpeg".to_string(),
        });

        match filter.apply_gain(b"not-audio", 0.3).await {
            Err(FilterError::ProcessFailed(msg)) => {
                assert!(msg.contains("Failed to spawn ffmpeg"));
            }
            other => panic!("expected ProcessFailed, got {:?}", other.map(|b| b.len())),
        }
    }
}
