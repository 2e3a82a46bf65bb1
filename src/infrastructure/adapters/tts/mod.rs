//! TTS Adapter - 语音合成客户端实现

mod fake_speech_client;
mod openai_speech_client;

pub use fake_speech_client::{FakeSpeechClient, FakeSpeechClientConfig};
pub use openai_speech_client::{OpenAiSpeechClient, OpenAiSpeechClientConfig};
