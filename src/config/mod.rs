/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量和运行时校验
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod assets;
pub mod input;
pub mod locomotion;

pub use assets::{AssetConfig, LoadStrategy};
pub use input::KeyBindings;
pub use locomotion::LocomotionConfig;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 角色控制器主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// 运动配置
    #[serde(default)]
    pub locomotion: LocomotionConfig,

    /// 资源配置
    #[serde(default)]
    pub assets: AssetConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ControllerConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("LOCOMOTION_BASE_SPEED") {
            if let Ok(speed) = val.parse() {
                self.locomotion.base_speed = speed;
            }
        }
        if let Ok(val) = env::var("LOCOMOTION_FADE_DURATION") {
            if let Ok(fade) = val.parse() {
                self.locomotion.fade_duration = fade;
            }
        }
        if let Ok(val) = env::var("LOCOMOTION_ASSET_PATH") {
            match self.assets.strategy {
                LoadStrategy::Bundled => self.assets.bundled_path = val,
                LoadStrategy::PerClip => self.assets.base_path = val,
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.locomotion.validate()?;
        self.assets.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./locomotion.toml
    /// 2. ./locomotion.json
    /// 3. ~/.config/character_locomotion/config.toml
    /// 4. 使用默认配置
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::from_toml_file("locomotion.toml") {
            tracing::info!(target: "locomotion", "Loaded config from locomotion.toml");
            return config;
        }

        if let Ok(config) = Self::from_json_file("locomotion.json") {
            tracing::info!(target: "locomotion", "Loaded config from locomotion.json");
            return config;
        }

        if let Some(home) = env::var_os("HOME") {
            let config_path = PathBuf::from(home)
                .join(".config")
                .join("character_locomotion")
                .join("config.toml");

            if let Ok(config) = Self::from_toml_file(&config_path) {
                tracing::info!(target: "locomotion", "Loaded config from {:?}", config_path);
                return config;
            }
        }

        tracing::info!(target: "locomotion", "Using default configuration");
        Self::default()
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 未设置时生效）
    pub level: LogLevel,
}

use crate::impl_default;

impl_default!(LoggingConfig {
    level: LogLevel::Info,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = ControllerConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: ControllerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.locomotion.base_speed, parsed.locomotion.base_speed);
        assert_eq!(config.assets.clip_names, parsed.assets.clip_names);
        assert_eq!(
            config.assets.aliases.spellings("WalkBackward"),
            parsed.assets.aliases.spellings("WalkBackward")
        );
    }

    #[test]
    fn test_json_serialization() {
        let config = ControllerConfig::default();
        let json_str = serde_json::to_string(&config).unwrap();
        let parsed: ControllerConfig = serde_json::from_str(&json_str).unwrap();
        assert_eq!(config.locomotion.fade_duration, parsed.locomotion.fade_duration);
        assert_eq!(config.assets.strategy, parsed.assets.strategy);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ControllerConfig::from_toml_str(
            r#"
            [locomotion]
            base_speed = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.locomotion.base_speed, 1.5);
        assert_eq!(config.locomotion.fade_duration, 0.2);
        assert_eq!(config.locomotion.key_bindings.backward, "c");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_toml() {
        let result = ControllerConfig::from_toml_str("[locomotion\nbase_speed = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
