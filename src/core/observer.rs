//! 可观测性钩子
//!
//! 控制器在状态切换和加载里程碑处调用观察者。所有方法都有空实现，
//! 观察者是可选的，测试可以完全不安装。`tracing` 日志与观察者互不依赖。

use crate::resources::LoadProgress;

/// 控制器观察者
pub trait ControllerObserver: Send + Sync {
    /// 逐片段加载进度变化
    fn on_load_progress(&self, _progress: &LoadProgress) {}

    /// 片段以原始名称注册
    fn on_clip_registered(&self, _name: &str) {}

    /// 规范名称通过别名指向了已有片段
    fn on_alias_applied(&self, _canonical: &str, _source: &str) {}

    /// `init` 完成，`initial` 为初始播放的片段
    fn on_ready(&self, _initial: Option<&str>) {}

    /// 开始交叉淡入淡出
    fn on_transition(&self, _from: &str, _to: &str) {}

    /// 目标片段或当前片段未注册，过渡被跳过
    fn on_transition_skipped(&self, _from: &str, _to: &str) {}

    /// 控制器已释放
    fn on_disposed(&self) {}
}

/// 默认的空观察者
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ControllerObserver for NoopObserver {}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// 记录所有回调的观察者
    #[derive(Default)]
    pub struct RecordingObserver {
        pub events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        pub fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl ControllerObserver for RecordingObserver {
        fn on_load_progress(&self, progress: &LoadProgress) {
            self.push(format!(
                "progress {}/{} failed={}",
                progress.completed, progress.expected, progress.failed
            ));
        }

        fn on_clip_registered(&self, name: &str) {
            self.push(format!("registered {}", name));
        }

        fn on_alias_applied(&self, canonical: &str, source: &str) {
            self.push(format!("alias {} -> {}", canonical, source));
        }

        fn on_ready(&self, initial: Option<&str>) {
            self.push(format!("ready {}", initial.unwrap_or("-")));
        }

        fn on_transition(&self, from: &str, to: &str) {
            self.push(format!("transition {} -> {}", from, to));
        }

        fn on_transition_skipped(&self, from: &str, to: &str) {
            self.push(format!("skipped {} -> {}", from, to));
        }

        fn on_disposed(&self) {
            self.push("disposed".to_string());
        }
    }
}
