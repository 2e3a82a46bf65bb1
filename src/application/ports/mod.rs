//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_filter;
mod script_generator;
mod speech_engine;

pub use audio_filter::{AudioFilterPort, FilterError};
pub use script_generator::{ScriptGenError, ScriptGeneratorPort, ScriptRequest};
pub use speech_engine::{SpeechEnginePort, SpeechError};
