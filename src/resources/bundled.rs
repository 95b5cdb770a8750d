//! 打包加载策略
//!
//! 单个资源文件同时包含模型和全部动画。片段以资源中的原名注册，
//! 再由别名表补齐规范名称。缺少规范片段不会导致加载失败，
//! 之后对这些片段的过渡请求会被跳过并记录日志。

use super::loader::{AssetLoader, LoadedCharacter};
use super::source::{AssetSource, FetchProgress};
use crate::animation::{canonical, AliasTable, AnimationMixer, ClipRegistry};
use crate::config::AssetConfig;
use crate::core::{ControllerObserver, LoadResult};
use crate::scene::Model;
use futures::future::BoxFuture;
use std::sync::Arc;

/// 打包加载器
pub struct BundledLoader {
    source: Arc<dyn AssetSource>,
    asset_path: String,
    aliases: AliasTable,
    model_scale: f32,
}

impl BundledLoader {
    pub fn new(source: Arc<dyn AssetSource>, asset_path: impl Into<String>) -> Self {
        Self {
            source,
            asset_path: asset_path.into(),
            aliases: AliasTable::default(),
            model_scale: 1.0,
        }
    }

    /// 从资源配置创建
    pub fn from_config(source: Arc<dyn AssetSource>, config: &AssetConfig) -> Self {
        Self::new(source, config.bundled_path.clone())
            .with_aliases(config.aliases.clone())
            .with_model_scale(config.model_scale)
    }

    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_model_scale(mut self, scale: f32) -> Self {
        self.model_scale = scale;
        self
    }

    pub fn asset_path(&self) -> &str {
        &self.asset_path
    }

    async fn load_character(&self, observer: &dyn ControllerObserver) -> LoadResult<LoadedCharacter> {
        let report = |progress: FetchProgress| {
            tracing::debug!(
                target: "assets",
                "Loading {}: {:.0}%",
                self.asset_path,
                progress.percent()
            );
        };
        let asset = self
            .source
            .fetch_with_progress(&self.asset_path, &report)
            .await?;

        let mut model = Model::from_data(asset.model);
        model.set_uniform_scale(self.model_scale);
        let mut mixer = AnimationMixer::new(&model);

        let mut registry = ClipRegistry::new();
        for clip in &asset.clips {
            if registry.contains(&clip.name) {
                tracing::warn!(
                    target: "assets",
                    "Duplicate animation '{}' in {}, keeping the first",
                    clip.name,
                    self.asset_path
                );
                continue;
            }
            let handle = mixer.clip_action(clip);
            registry.register(clip.name.clone(), handle);
            observer.on_clip_registered(&clip.name);
        }

        tracing::info!(
            target: "assets",
            "Available animations: {:?}",
            registry.names().collect::<Vec<_>>()
        );

        for (canonical_name, source_name) in registry.apply_aliases(&self.aliases) {
            tracing::debug!(
                target: "assets",
                "Mapped '{}' to '{}'",
                canonical_name,
                source_name
            );
            observer.on_alias_applied(&canonical_name, &source_name);
        }

        if registry.is_empty() {
            tracing::warn!(target: "assets", "No animations found in {}", self.asset_path);
        } else {
            for name in registry.missing(&canonical::LOCOMOTION) {
                tracing::warn!(
                    target: "assets",
                    "Animation '{}' not found in {}, transitions to it will be skipped",
                    name,
                    self.asset_path
                );
            }
        }

        Ok(LoadedCharacter {
            model,
            mixer,
            registry,
        })
    }
}

impl AssetLoader for BundledLoader {
    fn load<'a>(
        &'a self,
        observer: &'a dyn ControllerObserver,
    ) -> BoxFuture<'a, LoadResult<LoadedCharacter>> {
        Box::pin(self.load_character(observer))
    }

    fn describe(&self) -> String {
        format!("bundled {}", self.asset_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationClip, Skeleton};
    use crate::core::observer::testing::RecordingObserver;
    use crate::core::{LoadError, NoopObserver};
    use crate::resources::{LoadedAsset, MemoryAssetSource};
    use crate::scene::ModelData;

    const PATH: &str = "peter/peter.glb";

    fn bundle(clips: &[&str]) -> LoadedAsset {
        clips.iter().fold(
            LoadedAsset::new(ModelData::new("peter", Skeleton::from_names(["Hips"]), 1)),
            |asset, name| asset.with_clip(AnimationClip::new(*name, 1.0).with_target("Hips")),
        )
    }

    fn loader(asset: LoadedAsset) -> BundledLoader {
        BundledLoader::new(Arc::new(MemoryAssetSource::new().with_asset(PATH, asset)), PATH)
    }

    #[tokio::test]
    async fn test_native_names_and_aliases() {
        let observer = RecordingObserver::default();
        let loaded = loader(bundle(&["TPose", "Idle", "WalkingForward", "WalkingBackwards"]))
            .load(&observer)
            .await
            .unwrap();

        assert_eq!(loaded.mixer.len(), 4);
        assert_eq!(
            loaded.registry.resolve(canonical::WALK_FORWARD),
            loaded.registry.resolve("WalkingForward")
        );
        assert!(loaded.registry.contains(canonical::T_POSE));
        assert_eq!(loaded.initial_action(), Some(canonical::IDLE));

        let events = observer.events();
        assert!(events.contains(&"registered TPose".to_string()));
        assert!(events.contains(&"alias WalkForward -> WalkingForward".to_string()));
        assert!(events.contains(&"alias WalkBackward -> WalkingBackwards".to_string()));
    }

    #[tokio::test]
    async fn test_missing_canonical_clip_is_not_an_error() {
        let loaded = loader(bundle(&["Idle", "WalkingForward"]))
            .load(&NoopObserver)
            .await
            .unwrap();

        assert!(loaded.registry.contains(canonical::WALK_FORWARD));
        assert!(!loaded.registry.contains(canonical::WALK_BACKWARD));
    }

    #[tokio::test]
    async fn test_no_clips() {
        let loaded = loader(bundle(&[])).load(&NoopObserver).await.unwrap();
        assert!(loaded.registry.is_empty());
        assert_eq!(loaded.initial_action(), None);
    }

    #[tokio::test]
    async fn test_duplicate_clip_names_keep_first() {
        let asset = bundle(&["Wave"]).with_clip(AnimationClip::new("Wave", 5.0));
        let loaded = loader(asset).load(&NoopObserver).await.unwrap();

        let handle = loaded.registry.resolve("Wave").unwrap();
        assert_eq!(loaded.mixer.action(handle).unwrap().duration(), 1.0);
        assert_eq!(loaded.mixer.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let loader = BundledLoader::new(Arc::new(MemoryAssetSource::new()), PATH);
        let err = loader.load(&NoopObserver).await.unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_model_scale() {
        let loaded = loader(bundle(&["Idle"]))
            .with_model_scale(0.01)
            .load(&NoopObserver)
            .await
            .unwrap();
        assert!((loaded.model.scale.x - 0.01).abs() < 1e-6);
    }
}
