use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 键盘映射
///
/// 键名不区分大小写，与 `InputSnapshot` 中的键名比较。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub speed_modifier: String,
}

impl_default!(KeyBindings {
    forward: "v".to_string(),
    backward: "c".to_string(),
    speed_modifier: "shift".to_string(),
});

impl KeyBindings {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        for (action, key) in [
            ("forward", &self.forward),
            ("backward", &self.backward),
            ("speed_modifier", &self.speed_modifier),
        ] {
            if key.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "key binding '{}' must not be empty",
                    action
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_binding_rejected() {
        let bindings = KeyBindings {
            forward: " ".to_string(),
            ..KeyBindings::default()
        };
        assert!(bindings.validate().is_err());
        assert!(KeyBindings::default().validate().is_ok());
    }
}
