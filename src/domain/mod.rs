//! Domain Layer - 领域层
//!
//! 纯逻辑，无 I/O：
//! - script: 结构化脚本模型、解析与降级兜底
//! - chunker: 语音引擎安全的文本分块
//! - duration: 播放时长估算
//! - topic: 话题目录查找

pub mod chunker;
pub mod duration;
pub mod script;
pub mod topic;

pub use script::{degraded_script, episode_date, parse_script, ParseError, Source, Story, StructuredScript};
pub use topic::{resolve_topics, Topic, TOPICS};
