//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ScriptGenerator、SpeechEngine、AudioFilter）
//! - pipeline: 脚本到音频的合成管线
//! - error: 应用层错误定义

pub mod error;
pub mod pipeline;
pub mod ports;

pub use error::EpisodeError;
pub use pipeline::{
    GenerateEpisodeHandler, PodcastArtifact, SegmentSynthesizer, SeparatorCache,
    SynthesizerConfig, MAX_TOPICS,
};
pub use ports::{
    AudioFilterPort, FilterError, ScriptGenError, ScriptGeneratorPort, ScriptRequest,
    SpeechEnginePort, SpeechError,
};
