//! 运动状态机
//!
//! 输入快照 → 目标状态 + 位移。每帧都计算位移，与动画过渡无关：
//! 角色可以一边淡入淡出一边移动。

use super::input::InputSnapshot;
use crate::animation::canonical;
use crate::config::{KeyBindings, LocomotionConfig};
use glam::Vec3;

/// 运动状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionState {
    Idle,
    WalkForward,
    WalkBackward,
}

impl LocomotionState {
    pub const ALL: [LocomotionState; 3] = [
        LocomotionState::Idle,
        LocomotionState::WalkForward,
        LocomotionState::WalkBackward,
    ];

    /// 对应的规范动画名称
    pub fn canonical_name(&self) -> &'static str {
        match self {
            LocomotionState::Idle => canonical::IDLE,
            LocomotionState::WalkForward => canonical::WALK_FORWARD,
            LocomotionState::WalkBackward => canonical::WALK_BACKWARD,
        }
    }

    /// 沿前进轴的方向 (+1 / -1 / 0)
    pub fn direction(&self) -> f32 {
        match self {
            LocomotionState::Idle => 0.0,
            LocomotionState::WalkForward => 1.0,
            LocomotionState::WalkBackward => -1.0,
        }
    }

    pub fn is_walking(&self) -> bool {
        *self != LocomotionState::Idle
    }
}

/// 一帧的运动意图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocomotionIntent {
    pub state: LocomotionState,
    /// 是否按住加速键
    pub speed_modifier: bool,
}

/// 运动服务
///
/// - `CharacterController` (Component): 状态
/// - `LocomotionService` (Service): 状态选择和位移计算
/// - `locomotion_system` (System): 调度
pub struct LocomotionService;

impl LocomotionService {
    /// 由输入选择目标状态
    ///
    /// 后退键优先于前进键；加速键只影响速度，不影响状态。
    pub fn evaluate(input: &InputSnapshot, bindings: &KeyBindings) -> LocomotionIntent {
        let state = if input.is_held(&bindings.backward) {
            LocomotionState::WalkBackward
        } else if input.is_held(&bindings.forward) {
            LocomotionState::WalkForward
        } else {
            LocomotionState::Idle
        };

        LocomotionIntent {
            state,
            speed_modifier: input.is_held(&bindings.speed_modifier),
        }
    }

    /// 当前速度 (米/秒)
    pub fn speed(intent: &LocomotionIntent, config: &LocomotionConfig) -> f32 {
        if intent.speed_modifier {
            config.base_speed * config.speed_multiplier
        } else {
            config.base_speed
        }
    }

    /// 本帧位移
    ///
    /// `forward` 为角色前进方向；非法的 `delta` 不产生位移。
    pub fn displacement(
        intent: &LocomotionIntent,
        forward: Vec3,
        config: &LocomotionConfig,
        delta: f32,
    ) -> Vec3 {
        if !intent.state.is_walking() || !delta.is_finite() || delta <= 0.0 {
            return Vec3::ZERO;
        }
        forward * intent.state.direction() * Self::speed(intent, config) * delta
    }
}
