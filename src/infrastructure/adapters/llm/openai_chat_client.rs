//! OpenAI Chat Client - 调用 Chat Completions 生成脚本
//!
//! 实现 ScriptGeneratorPort trait。返回模型原始文本，
//! 结构化解析（含降级兜底）在领域层完成。
//!
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [...]}  (JSON)
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ScriptGenError, ScriptGeneratorPort, ScriptRequest};

const SYSTEM_PROMPT: &str = "You are a professional podcast host creating a daily personalized \
    podcast. Your style is engaging, informative, and conversational. You speak naturally with \
    appropriate pauses.";

/// Chat Completions 请求体
#[derive(Debug, Serialize)]
struct ChatHttpRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatHttpResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI Chat 客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiChatClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for OpenAiChatClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            timeout_secs: 120,
        }
    }
}

/// OpenAI Chat 客户端
pub struct OpenAiChatClient {
    client: Client,
    config: OpenAiChatClientConfig,
}

impl OpenAiChatClient {
    pub fn new(config: OpenAiChatClientConfig) -> Result<Self, ScriptGenError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScriptGenError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// 构造用户提示词
    ///
    /// 要求严格的 JSON 形状：标题、开场白（2-3 句）、2-3 条带来源的
    /// 故事、结束语（1-2 句）。明确禁止故事之间的口播过渡——过渡
    /// 由音频分隔音效承担。
    fn build_user_prompt(request: &ScriptRequest) -> String {
        format!(
            "Create a podcast script for {date} covering the following topics: {topics}.\n\n\
             Requirements:\n\
             1. Start with a warm, engaging introduction (2-3 sentences) mentioning it's the \
             listener's personalized daily podcast\n\
             2. Cover 2-3 interesting stories across the topics, each with a short title, the \
             spoken story text, and its sources\n\
             3. Do NOT include spoken transitions between stories - transition sounds are \
             inserted as audio\n\
             4. End with a brief, uplifting outro (1-2 sentences)\n\n\
             Respond with JSON only, exactly this shape:\n\
             {{\n\
               \"title\": \"A catchy episode title\",\n\
               \"intro\": \"The introduction...\",\n\
               \"stories\": [\n\
                 {{\n\
                   \"title\": \"Story title\",\n\
                   \"content\": \"The spoken story text...\",\n\
                   \"sources\": [{{\"title\": \"Source name\", \"url\": \"https://...\"}}]\n\
                 }}\n\
               ],\n\
               \"outro\": \"The closing...\"\n\
             }}\n\n\
             Make the script sound natural when read aloud - use conversational language, \
             rhetorical questions, and varied sentence structures.",
            date = request.date,
            topics = request.topic_names.join(", "),
        )
    }
}

#[async_trait]
impl ScriptGeneratorPort for OpenAiChatClient {
    async fn generate(&self, request: ScriptRequest) -> Result<String, ScriptGenError> {
        let http_request = ChatHttpRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::build_user_prompt(&request),
                },
            ],
            temperature: 0.7,
            max_tokens: 2000,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %http_request.model,
            topics = ?request.topic_names,
            "Sending script generation request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScriptGenError::Timeout
                } else if e.is_connect() {
                    ScriptGenError::NetworkError(format!("Cannot connect to OpenAI: {}", e))
                } else {
                    ScriptGenError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => return Err(ScriptGenError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(ScriptGenError::RateLimited),
            s if !s.is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                return Err(ScriptGenError::ServiceError(format!(
                    "HTTP {}: {}",
                    status, error_text
                )));
            }
            _ => {}
        }

        let body: ChatHttpResponse = response
            .json()
            .await
            .map_err(|e| ScriptGenError::ServiceError(format!("Invalid response body: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ScriptGenError::EmptyResponse)?;

        tracing::info!(content_len = content.len(), "Script generated");

        Ok(content)
    }
}
