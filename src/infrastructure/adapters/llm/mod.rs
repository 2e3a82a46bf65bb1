//! LLM Adapter - 脚本生成客户端实现

mod openai_chat_client;

pub use openai_chat_client::{OpenAiChatClient, OpenAiChatClientConfig};
