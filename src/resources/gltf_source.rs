//! glTF 文件资源源
//!
//! 从文件系统读取 `.glb` / `.gltf`，在阻塞线程池上解码。
//! 只读取绑定和时钟所需的结构信息（骨骼、节点名称、片段时长和目标），
//! 顶点和关键帧数据留给渲染器。

use super::source::{AssetSource, FetchProgress, LoadedAsset};
use crate::animation::{build_skeleton_from_gltf, AnimationClip, Skeleton};
use crate::core::{LoadError, LoadResult};
use crate::scene::ModelData;
use futures::future::BoxFuture;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// glTF 文件资源源
#[derive(Debug, Clone, Default)]
pub struct GltfAssetSource {
    root: PathBuf,
}

impl GltfAssetSource {
    /// `root` 为相对路径的解析起点
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    async fn read(&self, path: &str) -> LoadResult<Vec<u8>> {
        tokio::fs::read(self.resolve(path))
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => LoadError::fetch(path, "File not found"),
                _ => LoadError::Io(e),
            })
    }

    async fn decode(path: &str, bytes: Vec<u8>) -> LoadResult<LoadedAsset> {
        let owned = path.to_string();
        tokio::task::spawn_blocking(move || decode_gltf(&owned, &bytes))
            .await
            .map_err(|e| LoadError::decode(path, e))?
    }
}

impl AssetSource for GltfAssetSource {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, LoadResult<LoadedAsset>> {
        Box::pin(async move {
            let bytes = self.read(path).await?;
            Self::decode(path, bytes).await
        })
    }

    fn fetch_with_progress<'a>(
        &'a self,
        path: &'a str,
        progress: &'a (dyn Fn(FetchProgress) + Send + Sync),
    ) -> BoxFuture<'a, LoadResult<LoadedAsset>> {
        Box::pin(async move {
            let total = tokio::fs::metadata(self.resolve(path))
                .await
                .map(|m| m.len())
                .unwrap_or(0);
            progress(FetchProgress { loaded: 0, total });

            let bytes = self.read(path).await?;
            let loaded = bytes.len() as u64;
            progress(FetchProgress {
                loaded,
                total: total.max(loaded),
            });

            Self::decode(path, bytes).await
        })
    }
}

/// 解码 glTF 文档
///
/// 模型名称取第一个场景的名称，没有时取文件名。有蒙皮时骨骼来自第一个蒙皮，
/// 否则使用所有具名节点。片段时长为所有采样器输入访问器 `max` 的最大值。
pub fn decode_gltf(path: &str, bytes: &[u8]) -> LoadResult<LoadedAsset> {
    let document = gltf::Gltf::from_slice(bytes).map_err(|e| LoadError::decode(path, e))?;

    let name = document
        .scenes()
        .next()
        .and_then(|s| s.name().map(str::to_string))
        .unwrap_or_else(|| {
            Path::new(path)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    let skeleton = match document.skins().next() {
        Some(skin) => build_skeleton_from_gltf(&skin),
        None => Skeleton::from_names(document.nodes().filter_map(|n| n.name().map(str::to_string))),
    };

    let mut asset = LoadedAsset::new(ModelData::new(name, skeleton, document.meshes().count()));

    for (i, animation) in document.animations().enumerate() {
        let clip_name = animation
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("animation_{}", i));

        let duration = animation
            .channels()
            .filter_map(|channel| {
                channel
                    .sampler()
                    .input()
                    .max()
                    .and_then(|max| max.as_array()?.first()?.as_f64())
            })
            .fold(0.0_f64, f64::max) as f32;

        let clip = animation
            .channels()
            .filter_map(|channel| channel.target().node().name().map(str::to_string))
            .fold(AnimationClip::new(clip_name, duration), |clip, node| {
                clip.with_target(node)
            });

        tracing::trace!(
            target: "assets",
            "Decoded clip '{}' ({:.2}s, {} targets) from {}",
            clip.name,
            clip.duration,
            clip.target_nodes.len(),
            path
        );
        asset.clips.push(clip);
    }

    Ok(asset)
}
