//! 动画系统模块
//!
//! 提供动画片段、可播放句柄、动画时钟和片段注册表。
//!
//! ## 功能特性
//!
//! - 动画片段数据 (`AnimationClip`)
//! - 带淡入淡出和循环模式的可播放片段 (`PlayableClip`)
//! - 绑定到模型的动画时钟 (`AnimationMixer`)
//! - 名称归一化的片段注册表 (`ClipRegistry` + `AliasTable`)
//!
//! ## 使用示例
//!
//! ```rust
//! use character_locomotion::animation::{AnimationClip, AnimationMixer, ClipRegistry, Skeleton};
//! use character_locomotion::scene::Model;
//!
//! let model = Model::new("peter", Skeleton::from_names(["Hips"]), 1);
//! let mut mixer = AnimationMixer::new(&model);
//!
//! let idle = mixer.clip_action(&AnimationClip::new("Idle", 2.0));
//! let mut registry = ClipRegistry::new();
//! registry.register("Idle", idle);
//!
//! if let Some(action) = mixer.action_mut(idle) {
//!     action.reset().play();
//! }
//! mixer.advance(0.5);
//! ```

pub mod action;
pub mod clip;
pub mod mixer;
pub mod registry;
pub mod skeleton;

pub use action::{Fade, LoopMode, PlaybackState, PlayableClip};
pub use clip::AnimationClip;
pub use mixer::{AnimationMixer, ClipHandle};
pub use registry::{canonical, AliasEntry, AliasTable, ClipRegistry};
pub use skeleton::{Bone, Skeleton};

#[cfg(feature = "gltf")]
pub use skeleton::build_skeleton_from_gltf;
