//! 结构化播客脚本
//!
//! 语言模型返回的脚本契约：标题 + 开场白 + 若干故事 + 结束语。
//! 解析失败时降级为"原始文本当开场白"的兜底脚本，保证管线永远
//! 能产出可播放的内容。

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 脚本解析错误
///
/// 该错误不会越过应用层：调用方捕获后执行 [`degraded_script`] 兜底。
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid script JSON: {0}")]
    InvalidJson(String),
}

/// 新闻来源
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// 展示标签，可能缺失
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
}

impl Source {
    /// 展示文本（缺失标签时退回 URL）
    pub fn display(&self) -> &str {
        match &self.title {
            Some(t) if !t.is_empty() => t,
            _ => &self.url,
        }
    }
}

/// 单条故事
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    /// 朗读文本；为空时在音频中跳过，但仍保留在文稿里
    pub content: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// 结构化脚本
///
/// `stories` 的顺序就是播放顺序，必须与音频拼接顺序完全一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredScript {
    pub title: String,
    pub intro: String,
    #[serde(default)]
    pub stories: Vec<Story>,
    #[serde(default)]
    pub outro: String,
}

/// 模型偶尔把故事写成裸字符串而不是对象，这里做宽容反序列化
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoryPayload {
    Object {
        #[serde(default = "default_story_title")]
        title: String,
        content: String,
        #[serde(default)]
        sources: Vec<Source>,
    },
    Bare(String),
}

fn default_story_title() -> String {
    "Story".to_string()
}

impl From<StoryPayload> for Story {
    fn from(payload: StoryPayload) -> Self {
        match payload {
            StoryPayload::Object {
                title,
                content,
                sources,
            } => Story {
                title,
                content,
                sources,
            },
            StoryPayload::Bare(text) => Story {
                title: default_story_title(),
                content: text,
                sources: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScriptPayload {
    title: String,
    intro: String,
    #[serde(default)]
    stories: Vec<StoryPayload>,
    #[serde(default)]
    outro: String,
}

impl From<ScriptPayload> for StructuredScript {
    fn from(payload: ScriptPayload) -> Self {
        StructuredScript {
            title: payload.title,
            intro: payload.intro,
            stories: payload.stories.into_iter().map(Story::from).collect(),
            outro: payload.outro,
        }
    }
}

/// 去掉模型包裹输出的 Markdown 代码围栏
fn strip_code_fences(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !(trimmed.starts_with("```"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 解析模型原始输出为结构化脚本
///
/// 策略：直接按 JSON 解析；失败则剥掉代码围栏重试一次；仍失败
/// 返回 [`ParseError`]，由调用方走 [`degraded_script`]。
pub fn parse_script(raw: &str) -> Result<StructuredScript, ParseError> {
    let trimmed = raw.trim();
    match serde_json::from_str::<ScriptPayload>(trimmed) {
        Ok(payload) => Ok(payload.into()),
        Err(first_err) => {
            let unfenced = strip_code_fences(trimmed);
            serde_json::from_str::<ScriptPayload>(unfenced.trim())
                .map(StructuredScript::from)
                .map_err(|_| ParseError::InvalidJson(first_err.to_string()))
        }
    }
}

/// 人类可读的节目日期，例如 "Saturday, August 30, 2026"
pub fn episode_date() -> String {
    Utc::now().format("%A, %B %-d, %Y").to_string()
}

/// 兜底脚本：原始文本直接作为开场白朗读
///
/// 永远成功。标题使用带日期的占位符。
pub fn degraded_script(raw: &str) -> StructuredScript {
    StructuredScript {
        title: format!("Your Daily Podcast - {}", episode_date()),
        intro: raw.trim().to_string(),
        stories: Vec::new(),
        outro: String::new(),
    }
}
