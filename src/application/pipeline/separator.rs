//! 分隔音效缓存
//!
//! 段落之间插入的固定音频 bumper。进程生命周期内最多加载并
//! 滤镜一次：首个调用方读文件、压低增益、写入缓存，之后所有
//! 调用方（含并发首调）拿到同一份只读缓冲。
//!
//! 失败不会污染缓存：滤镜失败时 cell 保持未初始化，下一个
//! 请求可以重新触发加载。

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::ports::{AudioFilterPort, FilterError};

/// 分隔音效缓存
///
/// 可注入的单例服务，测试中用假滤镜替换后可以确定性地断言
/// 滤镜只执行一次。
pub struct SeparatorCache {
    asset_path: PathBuf,
    gain: f32,
    filter: Arc<dyn AudioFilterPort>,
    cell: OnceCell<Arc<Vec<u8>>>,
}

impl SeparatorCache {
    pub fn new(asset_path: impl Into<PathBuf>, gain: f32, filter: Arc<dyn AudioFilterPort>) -> Self {
        Self {
            asset_path: asset_path.into(),
            gain,
            filter,
            cell: OnceCell::new(),
        }
    }

    /// 获取滤镜后的分隔音效
    ///
    /// 单飞初始化：并发首调只会执行一次加载和滤镜，其余调用
    /// 等待同一次初始化的结果。
    pub async fn get(&self) -> Result<Arc<Vec<u8>>, FilterError> {
        let buffer = self
            .cell
            .get_or_try_init(|| async {
                let raw = tokio::fs::read(&self.asset_path).await.map_err(|e| {
                    FilterError::AssetNotReadable(format!(
                        "{}: {}",
                        self.asset_path.display(),
                        e
                    ))
                })?;

                tracing::info!(
                    path = %self.asset_path.display(),
                    raw_size = raw.len(),
                    gain = self.gain,
                    "Loading separator asset"
                );

                let filtered = self.filter.apply_gain(&raw, self.gain).await?;

                tracing::info!(filtered_size = filtered.len(), "Separator asset cached");
                Ok(Arc::new(filtered))
            })
            .await?;

        Ok(buffer.clone())
    }
}
