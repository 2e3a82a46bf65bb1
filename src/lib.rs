//! Daycast - 个性化每日播客生成服务
//!
//! 把一组用户选定的话题变成一集可播放的音频节目：
//! 语言模型生成结构化新闻脚本 → 逐段语音合成（超长文本按句分块）→
//! 段落之间插入固定分隔音效 → 字节级装配 → 估算时长。
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - script: 结构化脚本契约、解析与降级兜底
//! - chunker / duration / topic: 纯函数工具
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ScriptGenerator, SpeechEngine, AudioFilter）
//! - Pipeline: 合成管线（Synthesizer, SeparatorCache, Assembler, GenerateEpisode）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: OpenAI Chat/Speech 客户端、ffmpeg 增益滤镜、Fake TTS

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
