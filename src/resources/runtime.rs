//! 全局异步运行时
//!
//! `init` 是异步的。宿主已有 Tokio 运行时时直接 `.await`；
//! 否则通过这里的共享运行时驱动，避免每个控制器各建一个运行时。

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

static GLOBAL_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// 获取全局运行时
///
/// 首次调用时创建一个多线程运行时，后续调用返回同一实例
pub fn global_runtime() -> &'static Runtime {
    GLOBAL_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("asset-io")
            .enable_all()
            .build()
            .expect("Failed to create global tokio runtime")
    })
}

/// 在全局运行时中执行异步任务
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    global_runtime().spawn(future)
}

/// 阻塞等待异步任务（不能在运行时内部调用）
pub fn block_on<F: Future>(future: F) -> F::Output {
    global_runtime().block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoopObserver;
    use crate::resources::{AssetLoader, BundledLoader, LoadedAsset, MemoryAssetSource};
    use std::sync::Arc;

    #[test]
    fn test_global_runtime_is_shared() {
        assert!(std::ptr::eq(global_runtime(), global_runtime()));
    }

    #[test]
    fn test_block_on_load() {
        let source = MemoryAssetSource::new().with_asset("peter.glb", LoadedAsset::default());
        let loader = BundledLoader::new(Arc::new(source), "peter.glb");

        let loaded = block_on(loader.load(&NoopObserver)).unwrap();
        assert!(loaded.registry.is_empty());
    }

    #[test]
    fn test_spawn_task() {
        let handle = spawn(async {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            42
        });
        assert_eq!(block_on(handle).unwrap(), 42);
    }
}
