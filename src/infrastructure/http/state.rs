//! Application State

use crate::application::GenerateEpisodeHandler;

/// 应用状态
///
/// 生成处理器持有全部端口依赖；分隔音效缓存在处理器内部，
/// 跨请求共享。
pub struct AppState {
    pub generate_handler: GenerateEpisodeHandler,
}

impl AppState {
    pub fn new(generate_handler: GenerateEpisodeHandler) -> Self {
        Self { generate_handler }
    }
}
