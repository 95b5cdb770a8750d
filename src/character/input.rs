//! 输入快照
//!
//! 外部输入模块每帧提供一份"当前按住了哪些键"的快照，控制器只读取，不保留。

use bevy_ecs::prelude::*;
use std::collections::HashSet;

/// 一帧的按键状态
///
/// 键名统一为小写，查询不区分大小写；未知按键直接忽略。
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashSet<String>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由按住的键构建
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            held: keys.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.press(key);
        self
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_lowercase());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    /// 某个键是否按住
    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(&key.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}
