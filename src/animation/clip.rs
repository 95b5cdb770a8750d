/// 动画片段数据
///
/// 从资源中解码出来的、尚未绑定到任何骨骼实例的片段。
/// 绑定后的可播放句柄见 [`PlayableClip`](super::PlayableClip)。
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// 动画名称（资源中的原始名称）
    pub name: String,
    /// 持续时间 (秒)
    pub duration: f32,
    /// 该片段驱动的节点（骨骼）名称
    pub target_nodes: Vec<String>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
            target_nodes: Vec::new(),
        }
    }

    /// 添加目标节点
    pub fn with_target(mut self, node: impl Into<String>) -> Self {
        let node = node.into();
        if !self.target_nodes.contains(&node) {
            self.target_nodes.push(node);
        }
        self
    }

    /// 以新名称复制片段（逐片段加载时按文件名注册）
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}
