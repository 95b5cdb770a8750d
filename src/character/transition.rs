//! 过渡引擎
//!
//! `current_action` 是"正在播放什么"的唯一依据。目标与之不同时，
//! 旧片段淡出、新片段归零后淡入，并立即把 `current_action` 改为目标；
//! 淡入淡出进行中再次换向只会开始第二段重叠的过渡，不会排队。

use crate::animation::{AnimationMixer, ClipRegistry};

/// 一次过渡请求的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// 目标就是当前片段
    Unchanged,
    /// 开始交叉淡入淡出
    Started,
    /// 当前或目标片段未注册，什么都没做
    Unresolved,
    /// 两个名称指向同一个片段，只更新名称
    Rebound,
}

/// 过渡服务
pub struct TransitionService;

impl TransitionService {
    /// 从 `current` 过渡到 `target`
    pub fn cross_fade(
        mixer: &mut AnimationMixer,
        registry: &ClipRegistry,
        current: &mut String,
        target: &str,
        fade_duration: f32,
    ) -> TransitionOutcome {
        if current.as_str() == target {
            return TransitionOutcome::Unchanged;
        }

        let (outgoing, incoming) = match (registry.resolve(current.as_str()), registry.resolve(target)) {
            (Some(outgoing), Some(incoming)) => (outgoing, incoming),
            (outgoing, incoming) => {
                tracing::debug!(
                    target: "animation",
                    "Transition {:?} -> {:?} skipped (outgoing found: {}, incoming found: {})",
                    current,
                    target,
                    outgoing.is_some(),
                    incoming.is_some()
                );
                return TransitionOutcome::Unresolved;
            }
        };

        if outgoing == incoming {
            *current = target.to_string();
            return TransitionOutcome::Rebound;
        }

        if let Some(action) = mixer.action_mut(outgoing) {
            action.fade_out(fade_duration);
        }
        if let Some(action) = mixer.action_mut(incoming) {
            action.reset().fade_in(fade_duration).play();
        }

        tracing::debug!(
            target: "animation",
            "Cross-fade {} -> {} over {:.2}s",
            current,
            target,
            fade_duration
        );
        *current = target.to_string();
        TransitionOutcome::Started
    }
}
