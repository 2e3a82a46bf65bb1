//! Script Generator Port - 脚本生成抽象
//!
//! 定义语言模型脚本生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 脚本生成错误
#[derive(Debug, Error)]
pub enum ScriptGenError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Rate limited by upstream")]
    RateLimited,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Empty response from model")]
    EmptyResponse,
}

/// 脚本生成请求
#[derive(Debug, Clone)]
pub struct ScriptRequest {
    /// 选中话题的展示名称（目录顺序）
    pub topic_names: Vec<String>,
    /// 人类可读的节目日期
    pub date: String,
}

/// Script Generator Port
///
/// 语言生成服务的抽象接口，返回模型原始文本，结构化解析在领域层完成
#[async_trait]
pub trait ScriptGeneratorPort: Send + Sync {
    /// 请求模型生成结构化脚本文本
    async fn generate(&self, request: ScriptRequest) -> Result<String, ScriptGenError>;
}
