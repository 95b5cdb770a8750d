//! 片段注册表
//!
//! 规范名称 → 可播放片段句柄。不同来源的资源对同一个动作可能使用不同的名称，
//! 批量加载结束后通过 [`AliasTable`] 统一一次。

use super::mixer::ClipHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 规范动画名称
pub mod canonical {
    pub const IDLE: &str = "Idle";
    pub const WALK_FORWARD: &str = "WalkForward";
    pub const WALK_BACKWARD: &str = "WalkBackward";
    pub const T_POSE: &str = "TPose";

    /// 运动状态机依赖的片段
    pub const LOCOMOTION: [&str; 3] = [IDLE, WALK_FORWARD, WALK_BACKWARD];
}

/// 别名表中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// 规范名称
    pub canonical: String,
    /// 可接受的来源名称，按优先级排列
    pub spellings: Vec<String>,
}

/// 别名表：规范名称 → 一个或多个来源名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    pub entries: Vec<AliasEntry>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
            .with(canonical::IDLE, ["Idle"])
            .with(canonical::WALK_FORWARD, ["WalkingForward"])
            .with(canonical::WALK_BACKWARD, ["WalkingBackwards"])
            .with(canonical::T_POSE, ["TPose"])
    }
}

impl AliasTable {
    /// 空表
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 添加或扩展一项
    pub fn with<I, S>(mut self, canonical: &str, spellings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spellings = spellings.into_iter().map(Into::into);
        match self.entries.iter_mut().find(|e| e.canonical == canonical) {
            Some(entry) => entry.spellings.extend(spellings),
            None => self.entries.push(AliasEntry {
                canonical: canonical.to_string(),
                spellings: spellings.collect(),
            }),
        }
        self
    }

    /// 某个规范名称接受的来源名称
    pub fn spellings(&self, canonical: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.canonical == canonical)
            .map(|e| e.spellings.as_slice())
    }
}

/// 片段注册表
///
/// 键唯一；同时记录注册顺序，用于"按加载顺序的第一个片段"这类查询。
#[derive(Debug, Clone, Default)]
pub struct ClipRegistry {
    clips: HashMap<String, ClipHandle>,
    order: Vec<String>,
}

impl ClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖
    pub fn register(&mut self, name: impl Into<String>, handle: ClipHandle) {
        let name = name.into();
        if self.clips.insert(name.clone(), handle).is_none() {
            self.order.push(name);
        }
    }

    /// 按名称查找
    pub fn resolve(&self, name: &str) -> Option<ClipHandle> {
        self.clips.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// 为已有片段增加一个名称
    ///
    /// 仅当 `source_name` 存在且 `canonical_name` 尚未注册时生效；
    /// 已有的直接注册永远不会被别名覆盖。返回是否新建了映射。
    pub fn alias(&mut self, canonical_name: &str, source_name: &str) -> bool {
        if self.contains(canonical_name) {
            return false;
        }
        match self.resolve(source_name) {
            Some(handle) => {
                self.register(canonical_name, handle);
                true
            }
            None => false,
        }
    }

    /// 应用别名表，返回新建的 (规范名称, 来源名称) 映射
    ///
    /// 每个规范名称取第一个存在的来源名称。
    pub fn apply_aliases(&mut self, table: &AliasTable) -> Vec<(String, String)> {
        let mut applied = Vec::new();
        for entry in &table.entries {
            if self.contains(&entry.canonical) {
                continue;
            }
            if let Some(source) = entry.spellings.iter().find(|s| self.contains(s)) {
                if self.alias(&entry.canonical, source) {
                    applied.push((entry.canonical.clone(), source.clone()));
                }
            }
        }
        applied
    }

    /// 按注册顺序列出所有名称
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// 第一个注册的名称
    pub fn first(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    /// 列出缺失的名称
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn clear(&mut self) {
        self.clips.clear();
        self.order.clear();
    }
}
