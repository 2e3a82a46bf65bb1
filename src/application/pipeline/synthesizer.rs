//! 段落合成器
//!
//! 把一个段落（开场白 / 单条故事 / 结束语）的文本变成音频字节。
//! 超过字符上限的文本先分块，逐块按序调用语音引擎，再按块序做
//! 字节级拼接——MP3 是帧式容器，独立编码的片段直接相接即可播放，
//! 不做重编码（这是结构性假设，换用带头部的容器格式时必须改为
//! 重封装）。

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SpeechEnginePort, SpeechError};
use crate::domain::chunker;

/// 合成器配置
#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    /// 单次合成调用的字符上限
    pub max_chars: usize,
    /// 瞬态失败的最大重试次数（按块计）
    pub max_retries: u32,
    /// 首次重试前的退避时长，之后指数翻倍
    pub retry_backoff_ms: u64,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            max_chars: chunker::DEFAULT_MAX_CHARS,
            max_retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

/// 段落合成器
pub struct SegmentSynthesizer {
    engine: Arc<dyn SpeechEnginePort>,
    config: SynthesizerConfig,
}

impl SegmentSynthesizer {
    pub fn new(engine: Arc<dyn SpeechEnginePort>, config: SynthesizerConfig) -> Self {
        Self { engine, config }
    }

    /// 合成一个段落，返回拼接好的音频字节
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        if text.chars().count() <= self.config.max_chars {
            return self.speak_with_retry(text).await;
        }

        let chunks = chunker::chunk(text, self.config.max_chars);
        tracing::debug!(
            text_chars = text.chars().count(),
            chunk_count = chunks.len(),
            "Text exceeds limit, synthesizing in chunks"
        );

        // 块必须按序合成、按序拼接，块序就是播放顺序
        let mut audio = Vec::new();
        for chunk in &chunks {
            let bytes = self.speak_with_retry(chunk).await?;
            audio.extend_from_slice(&bytes);
        }

        Ok(audio)
    }

    /// 单块合成，瞬态错误按配置做有界指数退避重试
    async fn speak_with_retry(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let mut attempt = 0;
        loop {
            match self.engine.speak(text).await {
                Ok(bytes) => return Ok(bytes),
                Err(err) if err.is_transient() && attempt < self.config.max_retries => {
                    let backoff = Duration::from_millis(
                        self.config.retry_backoff_ms << attempt,
                    );
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "Transient TTS failure, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 记录每次调用文本的假引擎
    struct RecordingEngine {
        calls: Mutex<Vec<String>>,
        fail_times: AtomicUsize,
    }

    impl RecordingEngine {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_times: AtomicUsize::new(0),
            }
        }

        fn failing(times: usize) -> Self {
            let engine = Self::new();
            engine.fail_times.store(times, Ordering::SeqCst);
            engine
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpeechEnginePort for RecordingEngine {
        async fn speak(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
            self.calls.lock().unwrap().push(text.to_string());
            let remaining = self.fail_times.load(Ordering::SeqCst);
            if remaining > 0 {
                self.fail_times.store(remaining - 1, Ordering::SeqCst);
                return Err(SpeechError::Timeout);
            }
            // 每块回一个可区分的"音频"，方便断言拼接顺序
            Ok(format!("<{}>", text).into_bytes())
        }
    }

    fn config(max_chars: usize) -> SynthesizerConfig {
        SynthesizerConfig {
            max_chars,
            max_retries: 2,
            retry_backoff_ms: 1,
        }
    }

    #[tokio::test]
    async fn test_short_text_single_call() {
        let engine = Arc::new(RecordingEngine::new());
        let synth = SegmentSynthesizer::new(engine.clone(), config(100));

        let audio = synth.synthesize("Hello there.").await.unwrap();
        assert_eq!(audio, b"<Hello there.>");
        assert_eq!(engine.calls(), vec!["Hello there."]);
    }

    #[tokio::test]
    async fn test_long_text_one_call_per_chunk_in_order() {
        let engine = Arc::new(RecordingEngine::new());
        let synth = SegmentSynthesizer::new(engine.clone(), config(25));

        let text = "First sentence here. Second sentence here. Third sentence here.";
        let audio = synth.synthesize(text).await.unwrap();

        let calls = engine.calls();
        assert_eq!(
            calls,
            vec![
                "First sentence here.",
                "Second sentence here.",
                "Third sentence here."
            ]
        );
        // 字节拼接顺序与块序一致
        assert_eq!(
            audio,
            b"<First sentence here.><Second sentence here.><Third sentence here.>".to_vec()
        );
    }

    #[tokio::test]
    async fn test_transient_failure_retried() {
        let engine = Arc::new(RecordingEngine::failing(1));
        let synth = SegmentSynthesizer::new(engine.clone(), config(100));

        let audio = synth.synthesize("Retry me.").await.unwrap();
        assert_eq!(audio, b"<Retry me.>");
        assert_eq!(engine.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_retries_exhausted_propagates() {
        let engine = Arc::new(RecordingEngine::failing(10));
        let synth = SegmentSynthesizer::new(engine.clone(), config(100));

        let result = synth.synthesize("Never works.").await;
        assert!(matches!(result, Err(SpeechError::Timeout)));
        // 1 次原始调用 + 2 次重试
        assert_eq!(engine.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_non_transient_failure_not_retried() {
        struct UnauthorizedEngine {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl SpeechEnginePort for UnauthorizedEngine {
            async fn speak(&self, _text: &str) -> Result<Vec<u8>, SpeechError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(SpeechError::Unauthorized)
            }
        }

        let engine = Arc::new(UnauthorizedEngine {
            calls: AtomicUsize::new(0),
        });
        let synth = SegmentSynthesizer::new(engine.clone(), config(100));

        assert!(matches!(
            synth.synthesize("text").await,
            Err(SpeechError::Unauthorized)
        ));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_oversized_sentence_still_sent() {
        let engine = Arc::new(RecordingEngine::new());
        let synth = SegmentSynthesizer::new(engine.clone(), config(20));

        // 单句超限：原样发给引擎，由上游决定拒绝或截断
        let text = "This single sentence is far longer than the limit allows.";
        synth.synthesize(text).await.unwrap();
        assert_eq!(engine.calls(), vec![text]);
    }
}
