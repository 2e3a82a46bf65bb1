//! HTTP DTOs
//!
//! 请求/响应数据传输对象。音频以 base64 编码传输，
//! 消费方解码后按普通 MP3 播放或下载。

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::PodcastArtifact;
use crate::domain::{Story, Topic};

/// 生成一集的请求体
#[derive(Debug, Deserialize)]
pub struct GeneratePodcastRequest {
    pub topics: Vec<String>,
}

/// 生成一集的响应体
#[derive(Debug, Serialize)]
pub struct PodcastResponse {
    pub episode_id: Uuid,
    /// base64 编码的整集 MP3
    pub audio_base64: String,
    pub title: String,
    /// 估算播放时长（秒）
    pub duration: f64,
    pub intro: String,
    pub stories: Vec<Story>,
    pub outro: String,
}

impl From<PodcastArtifact> for PodcastResponse {
    fn from(artifact: PodcastArtifact) -> Self {
        Self {
            episode_id: artifact.episode_id,
            audio_base64: BASE64.encode(&artifact.audio),
            title: artifact.title,
            duration: artifact.duration_seconds,
            intro: artifact.intro,
            stories: artifact.stories,
            outro: artifact.outro,
        }
    }
}

/// 话题列表响应体
#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: &'static [Topic],
}
