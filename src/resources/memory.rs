//! 内存资源源
//!
//! 预先放入的资源按路径返回，可以注入失败和"闸门"（在闸门打开前挂起获取），
//! 用于测试加载顺序和无场景文件的演示。

use super::source::{AssetSource, LoadedAsset};
use crate::core::{LoadError, LoadResult};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

enum Entry {
    Asset(LoadedAsset),
    Failure(String),
}

/// 内存资源源
#[derive(Default)]
pub struct MemoryAssetSource {
    entries: HashMap<String, Entry>,
    gates: HashMap<String, Arc<Notify>>,
    log: Mutex<Vec<String>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 放入一个资源
    pub fn with_asset(mut self, path: impl Into<String>, asset: LoadedAsset) -> Self {
        self.entries.insert(path.into(), Entry::Asset(asset));
        self
    }

    /// 让某个路径的获取失败
    pub fn with_failure(mut self, path: impl Into<String>, reason: impl Into<String>) -> Self {
        self.entries.insert(path.into(), Entry::Failure(reason.into()));
        self
    }

    /// 该路径的获取在 `gate` 被通知前挂起
    pub fn with_gate(mut self, path: impl Into<String>, gate: Arc<Notify>) -> Self {
        self.gates.insert(path.into(), gate);
        self
    }

    /// 按开始顺序记录的获取路径
    pub fn fetch_log(&self) -> Vec<String> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, LoadResult<LoadedAsset>> {
        Box::pin(async move {
            if let Ok(mut log) = self.log.lock() {
                log.push(path.to_string());
            }

            if let Some(gate) = self.gates.get(path) {
                gate.notified().await;
            }

            match self.entries.get(path) {
                Some(Entry::Asset(asset)) => Ok(asset.clone()),
                Some(Entry::Failure(reason)) => Err(LoadError::fetch(path, reason)),
                None => Err(LoadError::fetch(path, "File not found")),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Skeleton;
    use crate::scene::ModelData;

    #[tokio::test]
    async fn test_fetch() {
        let source = MemoryAssetSource::new()
            .with_asset(
                "peter.glb",
                LoadedAsset::new(ModelData::new("peter", Skeleton::default(), 1)),
            )
            .with_failure("broken.glb", "connection reset");

        let asset = source.fetch("peter.glb").await.unwrap();
        assert_eq!(asset.model.name, "peter");

        let err = source.fetch("broken.glb").await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));

        assert!(source.fetch("missing.glb").await.is_err());
        assert_eq!(
            source.fetch_log(),
            vec!["peter.glb", "broken.glb", "missing.glb"]
        );
    }

    #[tokio::test]
    async fn test_gate_blocks_until_notified() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(
            MemoryAssetSource::new()
                .with_asset("slow.glb", LoadedAsset::default())
                .with_gate("slow.glb", gate.clone()),
        );

        let task = {
            let source = source.clone();
            tokio::spawn(async move { source.fetch("slow.glb").await.is_ok() })
        };

        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        gate.notify_one();
        assert!(task.await.unwrap());
    }
}
