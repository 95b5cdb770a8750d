//! 角色运动控制
//!
//! 遵循贫血模型：
//! - [`CharacterController`] (Component): 模型、动画时钟、注册表和当前动画
//! - [`LocomotionService`] / [`TransitionService`] (Service): 状态选择、位移和交叉淡入淡出
//! - [`locomotion_system`] (System): 每帧调度
//!
//! ## 使用示例
//!
//! ```rust
//! use character_locomotion::character::{CharacterController, InputSnapshot};
//! use character_locomotion::config::LocomotionConfig;
//! use character_locomotion::resources::{block_on, BundledLoader, MemoryAssetSource};
//! use glam::Vec3;
//! use std::sync::Arc;
//!
//! let source = Arc::new(MemoryAssetSource::new());
//! let loader = BundledLoader::new(source, "peter.glb");
//! let mut controller =
//!     CharacterController::new(Box::new(loader), Vec3::ZERO, LocomotionConfig::default());
//!
//! // 资源不存在，初始化失败，控制器不可再用
//! assert!(block_on(controller.init()).is_err());
//! assert!(controller.update(0.016, &InputSnapshot::new()).is_err());
//! ```

pub mod controller;
pub mod input;
pub mod locomotion;
pub mod system;
pub mod transition;

#[cfg(test)]
mod property_tests;

pub use controller::{ActionDebugInfo, CharacterController, Lifecycle};
pub use input::InputSnapshot;
pub use locomotion::{LocomotionIntent, LocomotionService, LocomotionState};
pub use system::{locomotion_system, FrameTime};
pub use transition::{TransitionOutcome, TransitionService};
