//! 骨骼数据结构
//!
//! 动画片段绑定到模型的骨骼上；这里只保留绑定所需的层级和名称信息，
//! 矩阵和蒙皮数据属于渲染器。

use std::collections::HashMap;

// ============================================================================
// 骨骼节点
// ============================================================================

/// 骨骼节点
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bone {
    /// 骨骼名称
    pub name: String,
    /// 父骨骼索引（None 表示根骨骼）
    pub parent_index: Option<usize>,
    /// 子骨骼索引列表
    pub children_indices: Vec<usize>,
}

impl Bone {
    pub fn new(name: impl Into<String>, parent_index: Option<usize>) -> Self {
        Self {
            name: name.into(),
            parent_index,
            children_indices: Vec::new(),
        }
    }
}

// ============================================================================
// 骨骼层级（Skeleton）
// ============================================================================

/// 骨骼层级
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    /// 所有骨骼
    pub bones: Vec<Bone>,
    /// 骨骼名称到索引的映射
    pub bone_name_to_index: HashMap<String, usize>,
}

impl Skeleton {
    /// 创建新的骨骼层级，并根据父索引建立子骨骼列表
    pub fn new(mut bones: Vec<Bone>) -> Self {
        for i in 0..bones.len() {
            if let Some(parent_idx) = bones[i].parent_index {
                if parent_idx < bones.len() && parent_idx != i {
                    bones[parent_idx].children_indices.push(i);
                }
            }
        }

        let bone_name_to_index = bones
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.clone(), i))
            .collect();

        Self {
            bones,
            bone_name_to_index,
        }
    }

    /// 由扁平的节点名称列表创建（没有层级信息的资源）
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(|n| Bone::new(n, None)).collect())
    }

    /// 获取骨骼数量
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// 通过名称获取骨骼索引
    pub fn get_bone_index(&self, name: &str) -> Option<usize> {
        self.bone_name_to_index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bone_name_to_index.contains_key(name)
    }

    /// 获取骨骼
    pub fn get_bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// 根骨骼
    pub fn roots(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter().filter(|b| b.parent_index.is_none())
    }

    /// 释放骨骼数据
    pub fn clear(&mut self) {
        self.bones.clear();
        self.bone_name_to_index.clear();
    }
}

// ============================================================================
// GLTF 导入辅助
// ============================================================================

/// 从 GLTF Skin 构建骨骼
///
/// # 示例
/// ```ignore
/// let gltf = gltf::Gltf::open("model.glb")?;
/// if let Some(skin) = gltf.skins().next() {
///     let skeleton = build_skeleton_from_gltf(&skin);
/// }
/// ```
#[cfg(feature = "gltf")]
pub fn build_skeleton_from_gltf(gltf_skin: &gltf::Skin) -> Skeleton {
    let joints: Vec<_> = gltf_skin.joints().collect();

    // gltf node index -> skeleton bone index
    let joint_to_index: HashMap<usize, usize> = joints
        .iter()
        .enumerate()
        .map(|(i, joint)| (joint.index(), i))
        .collect();

    // 通过遍历节点的 children 建立父子关系
    let mut parent_map: HashMap<usize, usize> = HashMap::new();
    for joint in &joints {
        for child in joint.children() {
            if joint_to_index.contains_key(&child.index()) {
                parent_map.insert(child.index(), joint.index());
            }
        }
    }

    let bones = joints
        .iter()
        .enumerate()
        .map(|(i, joint)| {
            let parent_index = parent_map
                .get(&joint.index())
                .and_then(|parent_node_idx| joint_to_index.get(parent_node_idx).copied());

            let name = joint
                .name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("bone_{}", i));

            Bone::new(name, parent_index)
        })
        .collect();

    Skeleton::new(bones)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_bone_hierarchy() {
        let bones = vec![
            Bone::new("Hips", None),
            Bone::new("Spine", Some(0)),
            Bone::new("Head", Some(1)),
        ];

        let skeleton = Skeleton::new(bones);

        assert_eq!(skeleton.bone_count(), 3);
        assert_eq!(skeleton.get_bone_index("Hips"), Some(0));
        assert_eq!(skeleton.get_bone_index("Head"), Some(2));
        assert_eq!(skeleton.bones[0].children_indices, vec![1]);
        assert_eq!(skeleton.bones[1].children_indices, vec![2]);
        assert_eq!(skeleton.roots().count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut skeleton = Skeleton::from_names(["Hips", "Spine"]);
        assert!(skeleton.contains("Spine"));

        skeleton.clear();
        assert!(skeleton.is_empty());
        assert!(!skeleton.contains("Spine"));
    }
}
