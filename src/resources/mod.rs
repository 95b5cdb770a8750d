//! 资源加载
//!
//! - [`AssetSource`]: 按路径获取并解码资源（文件、内存）
//! - [`AssetLoader`]: 加载策略，产出模型、动画时钟和填充好的注册表
//!   - [`PerClipLoader`]: 基础模型 + 每个动画一个文件，全部成功才算成功
//!   - [`BundledLoader`]: 单个文件包含模型和全部动画
//! - [`runtime`]: 宿主没有自己的异步运行时时使用的全局运行时

pub mod bundled;
#[cfg(feature = "gltf")]
pub mod gltf_source;
pub mod loader;
pub mod memory;
pub mod per_clip;
pub mod runtime;
pub mod source;

pub use bundled::BundledLoader;
#[cfg(feature = "gltf")]
pub use gltf_source::{decode_gltf, GltfAssetSource};
pub use loader::{AssetLoader, LoadProgress, LoadedCharacter};
pub use memory::MemoryAssetSource;
pub use per_clip::PerClipLoader;
pub use runtime::{block_on, global_runtime, spawn};
pub use source::{AssetSource, FetchProgress, LoadedAsset};

use crate::config::{AssetConfig, LoadStrategy};
use std::sync::Arc;

/// 按配置选择加载策略
pub fn loader_from_config(source: Arc<dyn AssetSource>, config: &AssetConfig) -> Box<dyn AssetLoader> {
    match config.strategy {
        LoadStrategy::Bundled => Box::new(BundledLoader::from_config(source, config)),
        LoadStrategy::PerClip => Box::new(PerClipLoader::from_config(source, config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_from_config() {
        let source: Arc<dyn AssetSource> = Arc::new(MemoryAssetSource::new());

        let bundled = loader_from_config(source.clone(), &AssetConfig::default());
        assert_eq!(bundled.describe(), "bundled assets/peter/peter.glb");

        let config = AssetConfig {
            strategy: LoadStrategy::PerClip,
            ..AssetConfig::default()
        };
        let per_clip = loader_from_config(source, &config);
        assert!(per_clip.describe().starts_with("per-clip assets/peter/mixamo/"));
    }
}
