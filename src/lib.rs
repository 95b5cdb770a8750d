//! # Character Locomotion
//!
//! Animation state and asset-normalization controller for a humanoid character.
//!
//! ## Features
//!
//! - **Locomotion State Machine**: keyboard snapshot → Idle / WalkForward / WalkBackward plus world-space displacement
//! - **Cross-Fade Transitions**: fixed-duration two-clip fades driven by a shared animation clock
//! - **Clip Registry**: canonical clip names reconciled from heterogeneous asset naming via an alias table
//! - **Asset Loading**: per-clip files (all-or-nothing) or a single bundled glTF asset, both async
//!
//! ## Architecture Design
//!
//! This crate follows the **Anemic Domain Model (贫血模型)** pattern:
//! - **State (Component)**: `CharacterController` holds model, mixer, registry and current action
//! - **Service**: `LocomotionService` and `TransitionService` with static methods
//! - **System**: `locomotion_system` drives every controller entity once per frame
//!
//! ### Example
//!
//! ```ignore
//! use character_locomotion::prelude::*;
//!
//! let source = Arc::new(GltfAssetSource::new("assets"));
//! let loader = BundledLoader::new(source, "peter/peter.glb");
//! let mut controller = CharacterController::new(Box::new(loader), Vec3::ZERO, LocomotionConfig::default());
//! controller.init().await?;
//!
//! controller.update(1.0 / 60.0, &InputSnapshot::from_keys(["v"]))?;
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Errors, logging and the observer hook
//! - [`config`]: Configuration
//! - [`animation`]: Clips, playable clips, mixer and registry
//! - [`scene`]: Character model
//! - [`resources`]: Asset sources and loading strategies
//! - [`character`]: Controller, locomotion and transitions

/// Errors, logging and observability hooks
pub mod core;
/// Configuration system
pub mod config;
/// Animation clips, clock and clip registry
pub mod animation;
/// Character model handle
pub mod scene;
/// Asset sources and loading strategies
pub mod resources;
/// Character controller, locomotion state machine and transition engine
pub mod character;

/// Commonly used types
pub mod prelude {
    pub use crate::animation::{canonical, AliasTable, ClipRegistry};
    pub use crate::character::{
        locomotion_system, CharacterController, FrameTime, InputSnapshot, Lifecycle,
    };
    pub use crate::config::{ControllerConfig, LocomotionConfig};
    pub use crate::core::{CharacterError, CharacterResult, ControllerObserver};
    #[cfg(feature = "gltf")]
    pub use crate::resources::GltfAssetSource;
    pub use crate::resources::{
        loader_from_config, AssetLoader, AssetSource, BundledLoader, PerClipLoader,
    };
    pub use glam::Vec3;
    pub use std::sync::Arc;
}
