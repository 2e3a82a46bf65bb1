//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod filter;
pub mod llm;
pub mod tts;

pub use filter::{FfmpegFilter, FfmpegFilterConfig};
pub use llm::{OpenAiChatClient, OpenAiChatClientConfig};
pub use tts::{FakeSpeechClient, FakeSpeechClientConfig, OpenAiSpeechClient, OpenAiSpeechClientConfig};
