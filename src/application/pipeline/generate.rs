//! 一集生成编排
//!
//! 完整管线：话题校验 → 脚本生成 → 结构化解析（失败降级）→
//! 各段落并发合成 → 按序装配 → 时长估算。
//!
//! 段落（开场白、每条故事、结束语）彼此独立，合成阶段并发
//! fan-out；装配阶段按脚本顺序重新收拢，顺序是硬性约束，
//! 并发只是优化。

use std::sync::Arc;

use futures_util::future::try_join_all;
use uuid::Uuid;

use crate::application::error::EpisodeError;
use crate::application::pipeline::{assembler, SegmentSynthesizer, SeparatorCache};
use crate::application::ports::{ScriptGeneratorPort, ScriptRequest};
use crate::domain::{self, episode_date, Story, StructuredScript};

/// 单次请求允许的话题数上限
pub const MAX_TOPICS: usize = 6;

/// 最终产物：整集音频 + 文稿元数据
///
/// 请求作用域内构造一次，之后不再变更。
#[derive(Debug, Clone)]
pub struct PodcastArtifact {
    pub episode_id: Uuid,
    /// 装配完成的整集音频（MP3 字节）
    pub audio: Vec<u8>,
    pub title: String,
    /// 估算播放时长（秒），近似值
    pub duration_seconds: f64,
    pub intro: String,
    pub stories: Vec<Story>,
    pub outro: String,
}

/// 一集生成处理器
pub struct GenerateEpisodeHandler {
    script_generator: Arc<dyn ScriptGeneratorPort>,
    synthesizer: SegmentSynthesizer,
    separator: Arc<SeparatorCache>,
}

impl GenerateEpisodeHandler {
    pub fn new(
        script_generator: Arc<dyn ScriptGeneratorPort>,
        synthesizer: SegmentSynthesizer,
        separator: Arc<SeparatorCache>,
    ) -> Self {
        Self {
            script_generator,
            synthesizer,
            separator,
        }
    }

    /// 生成一集播客
    pub async fn handle(&self, topic_ids: &[String]) -> Result<PodcastArtifact, EpisodeError> {
        // 话题校验必须发生在任何外部调用之前
        let topic_names = validate_topics(topic_ids)?;
        let episode_id = Uuid::new_v4();

        tracing::info!(
            episode_id = %episode_id,
            topics = ?topic_names,
            "Generating episode"
        );

        let raw = self
            .script_generator
            .generate(ScriptRequest {
                topic_names,
                date: episode_date(),
            })
            .await?;

        // 解析失败不是请求失败：降级为"原始文本当开场白"继续合成
        let script = match domain::parse_script(&raw) {
            Ok(script) => script,
            Err(err) => {
                tracing::warn!(
                    episode_id = %episode_id,
                    error = %err,
                    "Script not parseable, falling back to degraded script"
                );
                domain::degraded_script(&raw)
            }
        };

        let audio = self.synthesize_episode(&script).await?;
        let duration_seconds =
            domain::duration::estimate(&script.intro, &script.stories, &script.outro);

        tracing::info!(
            episode_id = %episode_id,
            title = %script.title,
            stories = script.stories.len(),
            audio_size = audio.len(),
            duration_seconds,
            "Episode generated"
        );

        Ok(PodcastArtifact {
            episode_id,
            audio,
            title: script.title,
            duration_seconds,
            intro: script.intro,
            stories: script.stories,
            outro: script.outro,
        })
    }

    /// 合成并装配整集音频
    ///
    /// 空文本段落在音频中跳过（文稿中保留）。
    async fn synthesize_episode(&self, script: &StructuredScript) -> Result<Vec<u8>, EpisodeError> {
        let mut texts: Vec<&str> = Vec::new();
        if !script.intro.trim().is_empty() {
            texts.push(&script.intro);
        }
        for story in &script.stories {
            if !story.content.trim().is_empty() {
                texts.push(&story.content);
            }
        }
        if !script.outro.trim().is_empty() {
            texts.push(&script.outro);
        }

        // 并发合成；try_join_all 保持输入顺序，装配顺序即脚本顺序
        let pieces =
            try_join_all(texts.iter().map(|&text| self.synthesizer.synthesize(text))).await?;

        // 段落不足两段时根本不需要分隔音效，跳过资产加载
        let separator = if pieces.len() >= 2 {
            Some(self.separator.get().await?)
        } else {
            None
        };
        let separator_bytes: &[u8] = separator.as_deref().map(Vec::as_slice).unwrap_or(&[]);

        Ok(assembler::assemble(&pieces, separator_bytes))
    }
}

/// 校验话题集合并解析为展示名称
fn validate_topics(topic_ids: &[String]) -> Result<Vec<String>, EpisodeError> {
    if topic_ids.is_empty() {
        return Err(EpisodeError::InvalidTopics(
            "at least one topic is required".to_string(),
        ));
    }
    if topic_ids.len() > MAX_TOPICS {
        return Err(EpisodeError::InvalidTopics(format!(
            "at most {} topics allowed, got {}",
            MAX_TOPICS,
            topic_ids.len()
        )));
    }

    let names: Vec<String> = domain::resolve_topics(topic_ids)
        .into_iter()
        .map(|t| t.name.to_string())
        .collect();
    if names.is_empty() {
        return Err(EpisodeError::InvalidTopics(
            "no known topics in request".to_string(),
        ));
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::SynthesizerConfig;
    use crate::application::ports::{
        AudioFilterPort, FilterError, ScriptGenError, SpeechEnginePort, SpeechError,
    };
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const SEP: &[u8] = b"|SEP|";

    /// 返回固定文本的假脚本生成器，并记录调用次数
    struct FakeGenerator {
        response: String,
        calls: AtomicUsize,
    }

    impl FakeGenerator {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ScriptGeneratorPort for FakeGenerator {
        async fn generate(&self, _request: ScriptRequest) -> Result<String, ScriptGenError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    /// 把文本原样包进尖括号的假语音引擎
    struct EchoEngine {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SpeechEnginePort for EchoEngine {
        async fn speak(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
            self.calls.lock().unwrap().push(text.to_string());
            Ok(format!("<{}>", text).into_bytes())
        }
    }

    /// 原样透传的假滤镜
    struct PassthroughFilter;

    #[async_trait]
    impl AudioFilterPort for PassthroughFilter {
        async fn apply_gain(&self, audio: &[u8], _gain: f32) -> Result<Vec<u8>, FilterError> {
            Ok(audio.to_vec())
        }
    }

    fn handler_with(
        generator: Arc<FakeGenerator>,
    ) -> (GenerateEpisodeHandler, Arc<EchoEngine>, tempfile::NamedTempFile) {
        let engine = Arc::new(EchoEngine {
            calls: Mutex::new(Vec::new()),
        });
        let mut asset = tempfile::NamedTempFile::new().unwrap();
        asset.write_all(SEP).unwrap();

        let separator = Arc::new(SeparatorCache::new(
            asset.path(),
            0.3,
            Arc::new(PassthroughFilter),
        ));
        let synthesizer = SegmentSynthesizer::new(
            engine.clone(),
            SynthesizerConfig {
                max_chars: 4000,
                max_retries: 0,
                retry_backoff_ms: 1,
            },
        );
        let handler = GenerateEpisodeHandler::new(generator, synthesizer, separator);
        (handler, engine, asset)
    }

    const TWO_STORY_SCRIPT: &str = r#"{
        "title": "Daily Brief",
        "intro": "Welcome to your daily brief.",
        "stories": [
            {"title": "A", "content": "Story one content.", "sources": []},
            {"title": "B", "content": "Story two content.", "sources": []}
        ],
        "outro": "See you tomorrow."
    }"#;

    fn count_separators(audio: &[u8]) -> usize {
        audio
            .windows(SEP.len())
            .filter(|window| *window == SEP)
            .count()
    }

    #[tokio::test]
    async fn test_two_story_episode() {
        let generator = FakeGenerator::new(TWO_STORY_SCRIPT);
        let (handler, _engine, _asset) = handler_with(generator);

        let topics = vec!["technology".to_string(), "ai".to_string()];
        let artifact = handler.handle(&topics).await.unwrap();

        assert_eq!(artifact.title, "Daily Brief");
        assert_eq!(artifact.stories.len(), 2);
        assert!(artifact.duration_seconds > 0.0);

        // intro |SEP| story1 |SEP| story2 |SEP| outro
        let expected = b"<Welcome to your daily brief.>|SEP|<Story one content.>|SEP|<Story two content.>|SEP|<See you tomorrow.>".to_vec();
        assert_eq!(artifact.audio, expected);
        assert_eq!(count_separators(&artifact.audio), 3);
    }

    #[tokio::test]
    async fn test_fenced_script_parses() {
        let fenced = format!("```json\n{}\n```", TWO_STORY_SCRIPT);
        let generator = FakeGenerator::new(&fenced);
        let (handler, _engine, _asset) = handler_with(generator);

        let artifact = handler.handle(&["ai".to_string()]).await.unwrap();
        assert_eq!(artifact.stories.len(), 2);
        assert_eq!(artifact.title, "Daily Brief");
    }

    #[tokio::test]
    async fn test_garbage_script_degrades_and_still_synthesizes() {
        let generator = FakeGenerator::new("sorry, here is your podcast!");
        let (handler, engine, _asset) = handler_with(generator);

        let artifact = handler.handle(&["ai".to_string()]).await.unwrap();

        assert!(artifact.title.starts_with("Your Daily Podcast - "));
        assert_eq!(artifact.intro, "sorry, here is your podcast!");
        assert!(artifact.stories.is_empty());
        assert_eq!(artifact.outro, "");
        // 只有开场白一个段落：一次合成调用，零分隔
        assert_eq!(engine.calls.lock().unwrap().len(), 1);
        assert_eq!(count_separators(&artifact.audio), 0);
    }

    #[tokio::test]
    async fn test_empty_topics_rejected_before_any_call() {
        let generator = FakeGenerator::new(TWO_STORY_SCRIPT);
        let (handler, engine, _asset) = handler_with(generator.clone());

        let result = handler.handle(&[]).await;
        assert!(matches!(result, Err(EpisodeError::InvalidTopics(_))));
        // 校验先于一切外部调用
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert!(engine.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_topic_set_rejected() {
        let generator = FakeGenerator::new(TWO_STORY_SCRIPT);
        let (handler, _engine, _asset) = handler_with(generator.clone());

        let topics: Vec<String> = (0..7).map(|i| format!("topic-{}", i)).collect();
        assert!(matches!(
            handler.handle(&topics).await,
            Err(EpisodeError::InvalidTopics(_))
        ));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_story_content_skipped_in_audio_kept_in_transcript() {
        let script = r#"{
            "title": "T",
            "intro": "Intro here.",
            "stories": [
                {"title": "Silent", "content": "", "sources": []},
                {"title": "Loud", "content": "Actual story.", "sources": []}
            ],
            "outro": ""
        }"#;
        let generator = FakeGenerator::new(script);
        let (handler, engine, _asset) = handler_with(generator);

        let artifact = handler.handle(&["ai".to_string()]).await.unwrap();

        // 文稿保留两条故事，音频只合成非空的那条
        assert_eq!(artifact.stories.len(), 2);
        assert_eq!(
            engine.calls.lock().unwrap().as_slice(),
            &["Intro here.", "Actual story."]
        );
        assert_eq!(artifact.audio, b"<Intro here.>|SEP|<Actual story.>".to_vec());
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        struct FailingGenerator;

        #[async_trait]
        impl ScriptGeneratorPort for FailingGenerator {
            async fn generate(&self, _request: ScriptRequest) -> Result<String, ScriptGenError> {
                Err(ScriptGenError::EmptyResponse)
            }
        }

        let engine = Arc::new(EchoEngine {
            calls: Mutex::new(Vec::new()),
        });
        let mut asset = tempfile::NamedTempFile::new().unwrap();
        asset.write_all(SEP).unwrap();
        let handler = GenerateEpisodeHandler::new(
            Arc::new(FailingGenerator),
            SegmentSynthesizer::new(engine, SynthesizerConfig::default()),
            Arc::new(SeparatorCache::new(asset.path(), 0.3, Arc::new(PassthroughFilter))),
        );

        assert!(matches!(
            handler.handle(&["ai".to_string()]).await,
            Err(EpisodeError::Script(ScriptGenError::EmptyResponse))
        ));
    }
}
