//! 应用层错误定义
//!
//! 一集生成失败的统一错误分类。脚本解析失败不在其中：
//! 解析失败在管线内部降级兜底，永远不会作为错误离开应用层。

use thiserror::Error;

use super::ports::{FilterError, ScriptGenError, SpeechError};

/// 一集生成的应用层错误
#[derive(Debug, Error)]
pub enum EpisodeError {
    /// 话题输入非法（为空或超出上限），在任何外部调用之前抛出
    #[error("Invalid topics: {0}")]
    InvalidTopics(String),

    /// 脚本生成上游失败
    #[error("Script generation failed: {0}")]
    Script(#[from] ScriptGenError),

    /// 语音合成失败
    #[error("Speech synthesis failed: {0}")]
    Speech(#[from] SpeechError),

    /// 分隔音效资产加载/滤镜失败
    #[error("Separator asset failed: {0}")]
    Separator(#[from] FilterError),
}

impl EpisodeError {
    /// 上游是否拒绝了凭证
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            EpisodeError::Script(ScriptGenError::Unauthorized)
                | EpisodeError::Speech(SpeechError::Unauthorized)
        )
    }

    /// 上游是否在限流
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            EpisodeError::Script(ScriptGenError::RateLimited)
                | EpisodeError::Speech(SpeechError::RateLimited)
        )
    }
}
