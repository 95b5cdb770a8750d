//! 动画时钟（Mixer）
//!
//! 每个模型绑定一个 mixer。mixer 拥有所有 [`PlayableClip`]，对外只暴露
//! [`ClipHandle`]，因此注册表里的多个名称可以指向同一个片段而不复制数据。

use super::action::PlayableClip;
use super::clip::AnimationClip;
use crate::scene::Model;
use std::collections::{HashMap, HashSet};

/// 可播放片段句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipHandle(usize);

impl ClipHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// 动画时钟
#[derive(Debug)]
pub struct AnimationMixer {
    /// 绑定的模型名称
    root: String,
    /// 模型中可被驱动的节点
    targets: HashSet<String>,
    actions: Vec<PlayableClip>,
    by_clip: HashMap<String, ClipHandle>,
    elapsed: f32,
    /// 全局播放速度
    pub time_scale: f32,
}

impl AnimationMixer {
    /// 绑定到模型
    pub fn new(model: &Model) -> Self {
        let mut targets: HashSet<String> = model
            .skeleton
            .bones
            .iter()
            .map(|b| b.name.clone())
            .collect();
        targets.insert(model.name.clone());

        Self {
            root: model.name.clone(),
            targets,
            actions: Vec::new(),
            by_clip: HashMap::new(),
            elapsed: 0.0,
            time_scale: 1.0,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// 为片段创建可播放句柄
    ///
    /// 同名片段只会创建一次，重复调用返回同一个句柄。
    pub fn clip_action(&mut self, clip: &AnimationClip) -> ClipHandle {
        if let Some(handle) = self.by_clip.get(&clip.name) {
            return *handle;
        }

        let unbound: Vec<&str> = clip
            .target_nodes
            .iter()
            .filter(|node| !self.targets.contains(node.as_str()))
            .map(String::as_str)
            .collect();
        if !unbound.is_empty() && self.targets.len() > 1 {
            tracing::warn!(
                target: "animation",
                "Clip '{}' targets {} node(s) missing from '{}': {:?}",
                clip.name,
                unbound.len(),
                self.root,
                unbound
            );
        }

        let handle = ClipHandle(self.actions.len());
        self.actions.push(PlayableClip::new(clip.clone()));
        self.by_clip.insert(clip.name.clone(), handle);
        handle
    }

    pub fn action(&self, handle: ClipHandle) -> Option<&PlayableClip> {
        self.actions.get(handle.0)
    }

    pub fn action_mut(&mut self, handle: ClipHandle) -> Option<&mut PlayableClip> {
        self.actions.get_mut(handle.0)
    }

    pub fn actions(&self) -> impl Iterator<Item = (ClipHandle, &PlayableClip)> {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, action)| (ClipHandle(i), action))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// 时钟累计时间 (秒)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// 推进时钟，驱动所有正在播放的片段
    pub fn advance(&mut self, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }

        let scaled = delta * self.time_scale;
        self.elapsed += scaled;
        for action in self.actions.iter_mut() {
            action.advance(scaled);
        }
    }

    /// 停止所有片段
    pub fn stop_all(&mut self) {
        for action in self.actions.iter_mut() {
            action.stop();
        }
    }

    /// 释放所有片段
    pub fn clear(&mut self) {
        self.actions.clear();
        self.by_clip.clear();
        self.targets.clear();
    }
}
