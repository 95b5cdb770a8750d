//! 资源获取接口
//!
//! 传输层（文件、网络）在控制器之外。加载策略只依赖 [`AssetSource`]：
//! 给定路径，异步返回解码后的模型和动画片段，失败时带上不透明的原因。

use crate::animation::AnimationClip;
use crate::core::LoadResult;
use crate::scene::ModelData;
use futures::future::BoxFuture;

/// 解码后的资源
#[derive(Debug, Clone, Default)]
pub struct LoadedAsset {
    /// 模型/场景
    pub model: ModelData,
    /// 内嵌动画片段，保持资源中的顺序
    pub clips: Vec<AnimationClip>,
}

impl LoadedAsset {
    pub fn new(model: ModelData) -> Self {
        Self {
            model,
            clips: Vec::new(),
        }
    }

    pub fn with_clip(mut self, clip: AnimationClip) -> Self {
        self.clips.push(clip);
        self
    }
}

/// 单次获取的字节进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProgress {
    pub loaded: u64,
    pub total: u64,
}

impl FetchProgress {
    /// 百分比；总量未知时为 0
    pub fn percent(&self) -> f32 {
        if self.total > 0 {
            self.loaded as f32 / self.total as f32 * 100.0
        } else {
            0.0
        }
    }
}

/// 资源获取者
pub trait AssetSource: Send + Sync {
    /// 获取并解码一个资源
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, LoadResult<LoadedAsset>>;

    /// 带进度回调的获取
    ///
    /// 默认实现只在开始和结束时各报告一次。
    fn fetch_with_progress<'a>(
        &'a self,
        path: &'a str,
        progress: &'a (dyn Fn(FetchProgress) + Send + Sync),
    ) -> BoxFuture<'a, LoadResult<LoadedAsset>> {
        Box::pin(async move {
            progress(FetchProgress {
                loaded: 0,
                total: 1,
            });
            let asset = self.fetch(path).await?;
            progress(FetchProgress {
                loaded: 1,
                total: 1,
            });
            Ok(asset)
        })
    }
}
