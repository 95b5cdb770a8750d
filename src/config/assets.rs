use super::{ConfigError, ConfigResult};
use crate::animation::AliasTable;
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 资源加载策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStrategy {
    /// 单个资源文件内含模型和全部动画
    Bundled,
    /// 基础模型和每个动画各自独立的文件
    PerClip,
}

/// 资源配置
///
/// 路径约定属于配置而不是协议：逐片段策略使用 `{base_path}/{name}.{extension}`，
/// 打包策略使用单个 `bundled_path`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// 加载策略
    pub strategy: LoadStrategy,

    /// 逐片段策略的资源目录
    pub base_path: String,

    /// 逐片段策略的文件扩展名
    pub extension: String,

    /// 逐片段策略的基础模型文件名 (不含扩展名)
    pub model_file: String,

    /// 逐片段策略要加载的动画文件名 (不含扩展名)
    pub clip_names: Vec<String>,

    /// 打包策略的资源路径
    pub bundled_path: String,

    /// 模型缩放
    pub model_scale: f32,

    /// 动画名称别名表
    pub aliases: AliasTable,
}

impl_default!(AssetConfig {
    strategy: LoadStrategy::Bundled,
    base_path: "assets/peter/mixamo".to_string(),
    extension: "glb".to_string(),
    model_file: "Idle".to_string(),
    clip_names: vec![
        "Idle".to_string(),
        "WalkingForward".to_string(),
        "WalkingBackwards".to_string(),
    ],
    bundled_path: "assets/peter/peter.glb".to_string(),
    model_scale: 1.0,
    aliases: AliasTable::default(),
});

impl AssetConfig {
    /// 逐片段策略中某个文件的完整路径
    pub fn clip_path(&self, name: &str) -> String {
        format!("{}/{}.{}", self.base_path, name, self.extension)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.model_scale.is_finite() || self.model_scale <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "model_scale must be positive, got {}",
                self.model_scale
            )));
        }
        match self.strategy {
            LoadStrategy::Bundled if self.bundled_path.is_empty() => Err(
                ConfigError::ValidationError("bundled_path must not be empty".to_string()),
            ),
            LoadStrategy::PerClip if self.clip_names.is_empty() => Err(
                ConfigError::ValidationError("clip_names must not be empty".to_string()),
            ),
            LoadStrategy::PerClip if self.model_file.is_empty() => Err(
                ConfigError::ValidationError("model_file must not be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_path() {
        let config = AssetConfig {
            base_path: "/peter/mixamo".to_string(),
            extension: "fbx".to_string(),
            ..AssetConfig::default()
        };
        assert_eq!(config.clip_path("Idle"), "/peter/mixamo/Idle.fbx");
    }

    #[test]
    fn test_per_clip_requires_clips() {
        let config = AssetConfig {
            strategy: LoadStrategy::PerClip,
            clip_names: Vec::new(),
            ..AssetConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
