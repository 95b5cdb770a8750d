//! 逐片段加载策略
//!
//! 一个基础模型文件加上 N 个独立的动画文件，所有动画绑定到基础模型的骨骼：
//!
//! ```text
//! {base_path}/{model_file}.{ext}   ──▶ Model + AnimationMixer
//! {base_path}/{clip_0}.{ext} ─┐
//! {base_path}/{clip_1}.{ext} ─┼──▶ 并发获取 ──▶ 全部结束后统一注册
//! {base_path}/{clip_n}.{ext} ─┘
//! ```
//!
//! 任何一个片段失败都会让整个加载失败，注册表不会以残缺状态交给调用者。

use super::loader::{AssetLoader, LoadProgress, LoadedCharacter};
use super::source::AssetSource;
use crate::animation::{canonical, AliasTable, AnimationClip, AnimationMixer, ClipRegistry, LoopMode};
use crate::config::AssetConfig;
use crate::core::{ControllerObserver, LoadError, LoadResult};
use crate::scene::Model;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;

/// 逐片段加载器
pub struct PerClipLoader {
    source: Arc<dyn AssetSource>,
    base_path: String,
    extension: String,
    model_file: String,
    clip_names: Vec<String>,
    aliases: AliasTable,
    model_scale: f32,
}

impl PerClipLoader {
    pub fn new<I, S>(source: Arc<dyn AssetSource>, base_path: impl Into<String>, clip_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source,
            base_path: base_path.into(),
            extension: "glb".to_string(),
            model_file: canonical::IDLE.to_string(),
            clip_names: clip_names.into_iter().map(Into::into).collect(),
            aliases: AliasTable::default(),
            model_scale: 1.0,
        }
    }

    /// 从资源配置创建
    pub fn from_config(source: Arc<dyn AssetSource>, config: &AssetConfig) -> Self {
        Self::new(source, config.base_path.clone(), config.clip_names.clone())
            .with_extension(config.extension.clone())
            .with_model_file(config.model_file.clone())
            .with_aliases(config.aliases.clone())
            .with_model_scale(config.model_scale)
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_model_file(mut self, model_file: impl Into<String>) -> Self {
        self.model_file = model_file.into();
        self
    }

    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_model_scale(mut self, scale: f32) -> Self {
        self.model_scale = scale;
        self
    }

    /// `{base_path}/{name}.{extension}`
    pub fn clip_path(&self, name: &str) -> String {
        format!("{}/{}.{}", self.base_path, name, self.extension)
    }

    async fn load_model(&self) -> LoadResult<Model> {
        let path = self.clip_path(&self.model_file);
        let asset = self.source.fetch(&path).await?;
        let mut model = Model::from_data(asset.model);
        model.set_uniform_scale(self.model_scale);
        tracing::debug!(
            target: "assets",
            "Base model '{}' loaded from {} ({} bones)",
            model.name,
            path,
            model.skeleton.bone_count()
        );
        Ok(model)
    }

    /// 并发获取所有片段，等待全部结束
    ///
    /// 返回值按请求顺序排列。
    async fn fetch_clips(
        &self,
        observer: &dyn ControllerObserver,
    ) -> Vec<(String, LoadResult<AnimationClip>)> {
        let mut progress = LoadProgress::new(self.clip_names.len());
        observer.on_load_progress(&progress);

        let source = self.source.as_ref();
        let mut pending: FuturesUnordered<_> = self
            .clip_names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let path = self.clip_path(name);
                async move {
                    let result = source.fetch(&path).await.and_then(|asset| {
                        asset
                            .clips
                            .into_iter()
                            .next()
                            .ok_or_else(|| LoadError::EmptyClipFile { path: path.clone() })
                    });
                    (index, result)
                }
            })
            .collect();

        let mut finished = Vec::with_capacity(self.clip_names.len());
        while let Some((index, result)) = pending.next().await {
            let name = &self.clip_names[index];
            match &result {
                Ok(clip) => {
                    progress.completed += 1;
                    tracing::debug!(
                        target: "assets",
                        "Loaded animation: {} ({:.2}s)",
                        name,
                        clip.duration
                    );
                }
                Err(e) => {
                    progress.failed += 1;
                    tracing::error!(target: "assets", "Failed to load {}: {}", name, e);
                }
            }
            observer.on_load_progress(&progress);
            finished.push((index, result));
        }

        finished.sort_by_key(|(index, _)| *index);
        finished
            .into_iter()
            .map(|(index, result)| (self.clip_names[index].clone(), result))
            .collect()
    }

    async fn load_character(&self, observer: &dyn ControllerObserver) -> LoadResult<LoadedCharacter> {
        // 片段没有骨骼目标就没有意义，模型必须先就绪
        let model = self.load_model().await?;
        let mut mixer = AnimationMixer::new(&model);

        let mut clips = Vec::with_capacity(self.clip_names.len());
        for (name, result) in self.fetch_clips(observer).await {
            match result {
                Ok(clip) => clips.push((name, clip)),
                Err(source) => {
                    return Err(LoadError::Clip {
                        name,
                        source: Box::new(source),
                    })
                }
            }
        }

        let mut registry = ClipRegistry::new();
        for (name, clip) in clips {
            // 导出工具常把每个文件里的片段都命名为同一个名字，按文件名区分
            let handle = mixer.clip_action(&clip.renamed(name.clone()));
            if let Some(action) = mixer.action_mut(handle) {
                action.set_loop(LoopMode::Repeat);
            }
            registry.register(name.clone(), handle);
            observer.on_clip_registered(&name);
        }

        for (canonical_name, source_name) in registry.apply_aliases(&self.aliases) {
            tracing::debug!(
                target: "assets",
                "Standard mapping: {} -> {}",
                canonical_name,
                source_name
            );
            observer.on_alias_applied(&canonical_name, &source_name);
        }

        let missing = registry.missing(&canonical::LOCOMOTION);
        if !missing.is_empty() {
            return Err(LoadError::IncompleteRegistry(missing));
        }

        tracing::info!(
            target: "assets",
            "All animations loaded: {:?}",
            registry.names().collect::<Vec<_>>()
        );

        Ok(LoadedCharacter {
            model,
            mixer,
            registry,
        })
    }
}

impl AssetLoader for PerClipLoader {
    fn load<'a>(
        &'a self,
        observer: &'a dyn ControllerObserver,
    ) -> BoxFuture<'a, LoadResult<LoadedCharacter>> {
        Box::pin(self.load_character(observer))
    }

    fn describe(&self) -> String {
        format!(
            "per-clip {}/{{{}}}.{}",
            self.base_path,
            self.clip_names.join(","),
            self.extension
        )
    }
}
