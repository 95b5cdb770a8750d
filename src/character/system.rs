//! 运动系统
//!
//! 宿主每帧写入 [`FrameTime`] 和 [`InputSnapshot`] 资源，
//! 系统驱动所有带 [`CharacterController`] 的实体。

use super::controller::CharacterController;
use super::input::InputSnapshot;
use bevy_ecs::prelude::*;

/// 帧时间
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameTime {
    /// 上一帧耗时 (秒)
    pub delta_seconds: f32,
    /// 累计时间 (秒)
    pub elapsed_seconds: f64,
}

impl FrameTime {
    /// 进入下一帧
    pub fn advance(&mut self, delta_seconds: f32) {
        self.delta_seconds = delta_seconds;
        self.elapsed_seconds += delta_seconds as f64;
    }
}

/// 运动系统 - 更新所有角色控制器
///
/// 未就绪或已释放的控制器会被跳过并记录日志，不会中断帧循环。
pub fn locomotion_system(
    time: Res<FrameTime>,
    input: Res<InputSnapshot>,
    mut query: Query<(Entity, &mut CharacterController)>,
) {
    for (entity, mut controller) in query.iter_mut() {
        if let Err(e) = controller.update(time.delta_seconds, &input) {
            tracing::trace!(target: "locomotion", "Skipping {:?}: {}", entity, e);
        }
    }
}
