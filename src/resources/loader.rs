//! 加载策略接口
//!
//! 两种资源组织方式（逐片段文件、单个打包资源）实现同一个 [`AssetLoader`]，
//! 在构造控制器时选定。状态机不关心资源是怎么来的。

use crate::animation::{canonical, AnimationMixer, ClipRegistry};
use crate::core::{ControllerObserver, LoadResult};
use crate::scene::Model;
use futures::future::BoxFuture;

/// 加载完成的角色
#[derive(Debug)]
pub struct LoadedCharacter {
    pub model: Model,
    pub mixer: AnimationMixer,
    pub registry: ClipRegistry,
}

impl LoadedCharacter {
    /// 初始片段：优先 Idle，否则按加载顺序的第一个
    pub fn initial_action(&self) -> Option<&str> {
        if self.registry.contains(canonical::IDLE) {
            Some(canonical::IDLE)
        } else {
            self.registry.first()
        }
    }
}

/// 逐片段加载进度
///
/// `expected` 在任何片段开始加载前确定，之后不再变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub expected: usize,
    pub completed: usize,
    pub failed: usize,
}

impl LoadProgress {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            completed: 0,
            failed: 0,
        }
    }

    /// 所有片段都已结束（成功或失败）
    pub fn is_complete(&self) -> bool {
        self.completed + self.failed >= self.expected
    }

    pub fn fraction(&self) -> f32 {
        if self.expected == 0 {
            1.0
        } else {
            (self.completed + self.failed) as f32 / self.expected as f32
        }
    }
}

/// 资源加载策略
pub trait AssetLoader: Send + Sync {
    /// 加载模型和动画，填充注册表
    fn load<'a>(
        &'a self,
        observer: &'a dyn ControllerObserver,
    ) -> BoxFuture<'a, LoadResult<LoadedCharacter>>;

    /// 用于日志的描述
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationClip, Skeleton};

    #[test]
    fn test_progress() {
        let mut progress = LoadProgress::new(3);
        assert!(!progress.is_complete());

        progress.completed = 2;
        progress.failed = 1;
        assert!(progress.is_complete());
        assert_eq!(progress.fraction(), 1.0);
        assert!(LoadProgress::new(0).is_complete());
    }

    #[test]
    fn test_initial_action_prefers_idle() {
        let model = Model::new("peter", Skeleton::default(), 1);
        let mut mixer = AnimationMixer::new(&model);
        let mut registry = ClipRegistry::new();
        for name in ["Dance", "Idle"] {
            let handle = mixer.clip_action(&AnimationClip::new(name, 1.0));
            registry.register(name, handle);
        }

        let loaded = LoadedCharacter {
            model,
            mixer,
            registry,
        };
        assert_eq!(loaded.initial_action(), Some("Idle"));
    }

    #[test]
    fn test_initial_action_falls_back_to_first() {
        let model = Model::new("robot", Skeleton::default(), 1);
        let mut mixer = AnimationMixer::new(&model);
        let mut registry = ClipRegistry::new();
        for name in ["Wave", "Dance"] {
            let handle = mixer.clip_action(&AnimationClip::new(name, 1.0));
            registry.register(name, handle);
        }

        let loaded = LoadedCharacter {
            model,
            mixer,
            registry,
        };
        assert_eq!(loaded.initial_action(), Some("Wave"));
    }
}
