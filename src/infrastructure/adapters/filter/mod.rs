//! Audio Filter Adapter - ffmpeg 增益滤镜实现

mod ffmpeg_filter;

pub use ffmpeg_filter::{FfmpegFilter, FfmpegFilterConfig};
