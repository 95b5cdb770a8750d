//! 角色模型
//!
//! 控制器只通过自己的模型句柄接触场景图：平移、缩放、读取骨骼和释放。

use crate::animation::Skeleton;
use glam::{Quat, Vec3};

/// 解码后的模型数据（加载器的原始输出）
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    /// 模型名称
    pub name: String,
    /// 骨骼
    pub skeleton: Skeleton,
    /// 网格数量
    pub mesh_count: usize,
}

impl ModelData {
    pub fn new(name: impl Into<String>, skeleton: Skeleton, mesh_count: usize) -> Self {
        Self {
            name: name.into(),
            skeleton,
            mesh_count,
        }
    }
}

/// 场景中的角色模型
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    /// 世界空间位置
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub skeleton: Skeleton,
    pub mesh_count: usize,
    disposed: bool,
}

impl Model {
    pub fn new(name: impl Into<String>, skeleton: Skeleton, mesh_count: usize) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            skeleton,
            mesh_count,
            disposed: false,
        }
    }

    /// 由解码数据构建模型
    pub fn from_data(data: ModelData) -> Self {
        Self::new(data.name, data.skeleton, data.mesh_count)
    }

    /// 模型局部前进方向（+Z）在世界空间中的朝向
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// 平移
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// 统一缩放
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::splat(scale);
    }

    /// 释放模型持有的资源
    pub fn dispose(&mut self) {
        self.skeleton.clear();
        self.mesh_count = 0;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
