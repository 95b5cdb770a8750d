//! 角色控制器
//!
//! 生命周期：
//!
//! ```text
//! Constructed ──init()──▶ Ready ──dispose()──▶ Disposed
//!      │                    ▲
//!      └──init() 失败──▶ Failed（不可再用）
//! ```
//!
//! 每帧 `update` 的顺序固定：选择状态 → 平移模型 → 必要时开始过渡 → 推进动画时钟。

use super::input::InputSnapshot;
use super::locomotion::LocomotionService;
use super::transition::{TransitionOutcome, TransitionService};
use crate::animation::{AnimationMixer, ClipHandle, ClipRegistry, LoopMode};
use crate::config::LocomotionConfig;
use crate::core::{
    CharacterResult, ControllerError, ControllerObserver, ControllerResult, NoopObserver,
};
use crate::resources::{AssetLoader, LoadedCharacter};
use crate::scene::Model;
use bevy_ecs::prelude::*;
use glam::Vec3;
use std::sync::Arc;

/// 控制器生命周期阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Constructed,
    Ready,
    Failed,
    Disposed,
}

/// 单个片段的调试快照
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDebugInfo {
    pub name: String,
    pub handle: ClipHandle,
    pub playing: bool,
    pub weight: f32,
    pub time: f32,
    pub duration: f32,
}

/// 角色控制器 (Component)
///
/// 持有模型、动画时钟、片段注册表和当前动画名称。
/// 逻辑在 [`LocomotionService`] 和 [`TransitionService`] 中。
#[derive(Component)]
pub struct CharacterController {
    loader: Box<dyn AssetLoader>,
    observer: Arc<dyn ControllerObserver>,
    config: LocomotionConfig,
    starting_position: Vec3,
    lifecycle: Lifecycle,
    character: Option<LoadedCharacter>,
    current_action: String,
    /// 最近一次被跳过的过渡，重复的跳过只记 debug
    last_skipped: Option<(String, String)>,
}

impl CharacterController {
    /// 以加载策略和起始位置构造，此时还没有任何资源
    pub fn new(loader: Box<dyn AssetLoader>, starting_position: Vec3, config: LocomotionConfig) -> Self {
        Self {
            loader,
            observer: Arc::new(NoopObserver),
            config,
            starting_position,
            lifecycle: Lifecycle::Constructed,
            character: None,
            current_action: String::new(),
            last_skipped: None,
        }
    }

    /// 安装观察者
    pub fn with_observer(mut self, observer: Arc<dyn ControllerObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 加载资源并开始播放初始片段
    ///
    /// 只能调用一次。失败后控制器进入 `Failed`，之后的 `update` 都会报错。
    pub async fn init(&mut self) -> CharacterResult<()> {
        match self.lifecycle {
            Lifecycle::Constructed => {}
            Lifecycle::Disposed => return Err(ControllerError::Disposed.into()),
            Lifecycle::Ready | Lifecycle::Failed => {
                return Err(ControllerError::AlreadyInitialized.into())
            }
        }

        tracing::info!(
            target: "locomotion",
            "Initializing character ({})",
            self.loader.describe()
        );

        let mut character = match self.loader.load(self.observer.as_ref()).await {
            Ok(character) => character,
            Err(e) => {
                tracing::error!(target: "locomotion", "Character initialization failed: {}", e);
                self.lifecycle = Lifecycle::Failed;
                return Err(e.into());
            }
        };

        character.model.position = self.starting_position;

        let initial = character.initial_action().map(str::to_string);
        match &initial {
            Some(name) => {
                if let Some(action) = character
                    .registry
                    .resolve(name)
                    .and_then(|handle| character.mixer.action_mut(handle))
                {
                    action.reset().play();
                }
                tracing::info!(target: "locomotion", "Character ready, playing '{}'", name);
            }
            None => {
                tracing::warn!(target: "locomotion", "Character ready without animations");
            }
        }

        self.current_action = initial.unwrap_or_default();
        self.character = Some(character);
        self.lifecycle = Lifecycle::Ready;
        self.observer
            .on_ready(Some(self.current_action.as_str()).filter(|name| !name.is_empty()));
        Ok(())
    }

    /// 推进一帧
    pub fn update(&mut self, delta: f32, input: &InputSnapshot) -> ControllerResult<()> {
        self.ensure_ready()?;
        let character = self
            .character
            .as_mut()
            .ok_or(ControllerError::NotInitialized)?;

        let intent = LocomotionService::evaluate(input, &self.config.key_bindings);
        let offset =
            LocomotionService::displacement(&intent, character.model.forward(), &self.config, delta);
        character.model.translate(offset);

        let target = intent.state.canonical_name();
        if target != self.current_action {
            let previous = self.current_action.clone();
            match TransitionService::cross_fade(
                &mut character.mixer,
                &character.registry,
                &mut self.current_action,
                target,
                self.config.fade_duration,
            ) {
                TransitionOutcome::Started | TransitionOutcome::Rebound => {
                    tracing::debug!(target: "locomotion", "{} -> {}", previous, target);
                    self.observer.on_transition(&previous, target);
                    self.last_skipped = None;
                }
                TransitionOutcome::Unresolved => {
                    self.observer.on_transition_skipped(&previous, target);
                    let pair = (previous, target.to_string());
                    if self.last_skipped.as_ref() == Some(&pair) {
                        tracing::debug!(
                            target: "locomotion",
                            "Animation transition {:?} -> {:?} skipped again",
                            pair.0,
                            pair.1
                        );
                    } else {
                        tracing::warn!(
                            target: "locomotion",
                            "Animation transition {:?} -> {:?} skipped: clip not registered",
                            pair.0,
                            pair.1
                        );
                        self.last_skipped = Some(pair);
                    }
                }
                TransitionOutcome::Unchanged => {}
            }
        }

        character.mixer.advance(delta);
        Ok(())
    }

    /// 释放所有片段和模型，可重复调用
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }

        if let Some(character) = self.character.as_mut() {
            character.mixer.stop_all();
            character.mixer.clear();
            character.registry.clear();
            character.model.dispose();
        }
        self.current_action.clear();
        self.last_skipped = None;
        self.lifecycle = Lifecycle::Disposed;

        tracing::info!(target: "locomotion", "Character disposed");
        self.observer.on_disposed();
    }

    fn ensure_ready(&self) -> ControllerResult<()> {
        match self.lifecycle {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Constructed => Err(ControllerError::NotInitialized),
            Lifecycle::Failed => Err(ControllerError::InitFailed),
            Lifecycle::Disposed => Err(ControllerError::Disposed),
        }
    }

    fn ready_character_mut(&mut self, operation: &str) -> Option<&mut LoadedCharacter> {
        if self.lifecycle != Lifecycle::Ready {
            tracing::warn!(
                target: "locomotion",
                "{} ignored: controller is {:?}",
                operation,
                self.lifecycle
            );
            return None;
        }
        self.character.as_mut()
    }

    fn ready_character(&self) -> Option<&LoadedCharacter> {
        self.character
            .as_ref()
            .filter(|_| self.lifecycle == Lifecycle::Ready)
    }

    // ------------------------------------------------------------------
    // 直接播放控制
    // ------------------------------------------------------------------

    /// 立即切换到某个片段（不淡入淡出）
    ///
    /// 返回片段是否存在。
    pub fn play_animation(&mut self, name: &str, looped: bool) -> bool {
        if self.lifecycle != Lifecycle::Ready {
            tracing::warn!(target: "locomotion", "play_animation('{}') ignored: controller not ready", name);
            return false;
        }
        let Some(character) = self.character.as_mut() else {
            return false;
        };

        let Some(handle) = character.registry.resolve(name) else {
            tracing::warn!(
                target: "locomotion",
                "Animation '{}' not found. Available: {:?}",
                name,
                character.registry.names().collect::<Vec<_>>()
            );
            return false;
        };

        if let Some(previous) = character.registry.resolve(&self.current_action) {
            if previous != handle {
                if let Some(action) = character.mixer.action_mut(previous) {
                    action.stop();
                }
            }
        }

        if let Some(action) = character.mixer.action_mut(handle) {
            let loop_mode = if looped { LoopMode::Repeat } else { LoopMode::Once };
            action.set_loop(loop_mode).reset().play();
        }
        self.current_action = name.to_string();
        true
    }

    /// 停止所有片段
    pub fn stop_all_animations(&mut self) {
        let Some(character) = self.ready_character_mut("stop_all_animations") else {
            return;
        };
        character.mixer.stop_all();
        self.current_action.clear();
    }

    /// 某个片段是否在播放
    pub fn is_animation_playing(&self, name: &str) -> bool {
        self.ready_character()
            .and_then(|c| c.registry.resolve(name).and_then(|h| c.mixer.action(h)))
            .is_some_and(|action| action.is_playing())
    }

    /// 所有已注册名称（含别名），按注册顺序
    pub fn animation_names(&self) -> Vec<String> {
        self.ready_character()
            .map(|c| c.registry.names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// 每个已注册名称的播放状态，同时写入日志
    pub fn debug_animations(&self) -> Vec<ActionDebugInfo> {
        let Some(character) = self.ready_character() else {
            return Vec::new();
        };

        let infos: Vec<ActionDebugInfo> = character
            .registry
            .names()
            .filter_map(|name| {
                let handle = character.registry.resolve(name)?;
                let action = character.mixer.action(handle)?;
                Some(ActionDebugInfo {
                    name: name.to_string(),
                    handle,
                    playing: action.is_playing(),
                    weight: action.effective_weight(),
                    time: action.time,
                    duration: action.duration(),
                })
            })
            .collect();

        tracing::debug!(target: "animation", "Current action: {:?}", self.current_action);
        for info in &infos {
            tracing::debug!(
                target: "animation",
                "{}: playing={}, weight={:.2}, time={:.2}/{:.2}",
                info.name,
                info.playing,
                info.weight,
                info.time,
                info.duration
            );
        }
        infos
    }

    // ------------------------------------------------------------------
    // 变换
    // ------------------------------------------------------------------

    /// 当前位置；加载完成前为起始位置
    pub fn position(&self) -> Vec3 {
        self.character
            .as_ref()
            .map(|c| c.model.position)
            .unwrap_or(self.starting_position)
    }

    pub fn set_position(&mut self, position: Vec3) {
        if let Some(character) = self.ready_character_mut("set_position") {
            character.model.position = position;
        }
    }

    pub fn starting_position(&self) -> Vec3 {
        self.starting_position
    }

    /// 统一缩放模型
    pub fn set_scale(&mut self, scale: f32) {
        if let Some(character) = self.ready_character_mut("set_scale") {
            character.model.set_uniform_scale(scale);
        }
    }

    // ------------------------------------------------------------------
    // 只读访问
    // ------------------------------------------------------------------

    pub fn current_action(&self) -> &str {
        &self.current_action
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn fade_duration(&self) -> f32 {
        self.config.fade_duration
    }

    pub fn model(&self) -> Option<&Model> {
        self.character.as_ref().map(|c| &c.model)
    }

    pub fn mixer(&self) -> Option<&AnimationMixer> {
        self.character.as_ref().map(|c| &c.mixer)
    }

    pub fn registry(&self) -> Option<&ClipRegistry> {
        self.character.as_ref().map(|c| &c.registry)
    }
}

impl std::fmt::Debug for CharacterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterController")
            .field("loader", &self.loader.describe())
            .field("lifecycle", &self.lifecycle)
            .field("current_action", &self.current_action)
            .field("position", &self.position())
            .finish()
    }
}
