use super::{ConfigError, ConfigResult, KeyBindings};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 运动配置
///
/// 同一套状态机通过这些参数覆盖不同角色，而不是为每个角色写一条代码路径。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// 基础移动速度 (米/秒)
    pub base_speed: f32,

    /// 按住加速键时的速度倍率
    pub speed_multiplier: f32,

    /// 交叉淡入淡出时长 (秒)
    pub fade_duration: f32,

    /// 键盘映射
    pub key_bindings: KeyBindings,
}

impl_default!(LocomotionConfig {
    base_speed: 0.5,
    speed_multiplier: 2.0,
    fade_duration: 0.2,
    key_bindings: KeyBindings::default(),
});

impl LocomotionConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.base_speed.is_finite() || self.base_speed <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "base_speed must be positive, got {}",
                self.base_speed
            )));
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "speed_multiplier must be positive, got {}",
                self.speed_multiplier
            )));
        }
        if !self.fade_duration.is_finite() || self.fade_duration < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "fade_duration must be non-negative, got {}",
                self.fade_duration
            )));
        }
        self.key_bindings.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_speed() {
        let mut config = LocomotionConfig::default();
        assert!(config.validate().is_ok());

        config.base_speed = 0.0;
        assert!(config.validate().is_err());

        config.base_speed = 1.0;
        config.fade_duration = f32::NAN;
        assert!(config.validate().is_err());
    }
}
