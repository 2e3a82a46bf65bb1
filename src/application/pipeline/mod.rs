//! 脚本到音频的合成管线
//!
//! - synthesizer: 段落分块合成
//! - separator: 分隔音效的单飞缓存
//! - assembler: 按序字节装配
//! - generate: 一集生成编排

pub mod assembler;
mod generate;
mod separator;
mod synthesizer;

pub use generate::{GenerateEpisodeHandler, PodcastArtifact, MAX_TOPICS};
pub use separator::SeparatorCache;
pub use synthesizer::{SegmentSynthesizer, SynthesizerConfig};
