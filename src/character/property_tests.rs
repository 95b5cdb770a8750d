//! 运动状态机和注册表的属性测试

use super::input::InputSnapshot;
use super::locomotion::{LocomotionIntent, LocomotionService, LocomotionState};
use crate::animation::{AnimationClip, AnimationMixer, ClipRegistry, Skeleton};
use crate::config::{KeyBindings, LocomotionConfig};
use crate::scene::Model;
use glam::{Quat, Vec3};
use proptest::prelude::*;

fn snapshot(forward: bool, backward: bool, modifier: bool, noise: &[String]) -> InputSnapshot {
    let bindings = KeyBindings::default();
    let mut input = InputSnapshot::from_keys(noise);
    for (held, key) in [
        (forward, &bindings.forward),
        (backward, &bindings.backward),
        (modifier, &bindings.speed_modifier),
    ] {
        if held {
            input.press(key);
        } else {
            input.release(key);
        }
    }
    input
}

proptest! {
    #[test]
    fn test_state_coverage(
        forward in any::<bool>(),
        backward in any::<bool>(),
        modifier in any::<bool>(),
        noise in prop::collection::vec("[a-z]{2,6}", 0..4),
    ) {
        let input = snapshot(forward, backward, modifier, &noise);
        let intent = LocomotionService::evaluate(&input, &KeyBindings::default());

        let expected = if backward {
            LocomotionState::WalkBackward
        } else if forward {
            LocomotionState::WalkForward
        } else {
            LocomotionState::Idle
        };
        prop_assert_eq!(intent.state, expected);
        prop_assert_eq!(intent.speed_modifier, modifier);
    }

    #[test]
    fn test_displacement_sign(
        delta in 0.001f32..1.0,
        yaw in -3.0f32..3.0,
        base_speed in 0.01f32..10.0,
    ) {
        let config = LocomotionConfig { base_speed, ..LocomotionConfig::default() };
        let forward = Quat::from_rotation_y(yaw) * Vec3::Z;

        for state in LocomotionState::ALL {
            let intent = LocomotionIntent { state, speed_modifier: false };
            let along = LocomotionService::displacement(&intent, forward, &config, delta).dot(forward);
            match state {
                LocomotionState::WalkForward => prop_assert!(along > 0.0),
                LocomotionState::WalkBackward => prop_assert!(along < 0.0),
                LocomotionState::Idle => prop_assert_eq!(along, 0.0),
            }
        }
    }

    #[test]
    fn test_speed_modifier_doubles_displacement(
        delta in 0.001f32..1.0,
        walking_forward in any::<bool>(),
    ) {
        let config = LocomotionConfig::default();
        let state = if walking_forward {
            LocomotionState::WalkForward
        } else {
            LocomotionState::WalkBackward
        };

        let normal = LocomotionService::displacement(
            &LocomotionIntent { state, speed_modifier: false },
            Vec3::Z,
            &config,
            delta,
        );
        let fast = LocomotionService::displacement(
            &LocomotionIntent { state, speed_modifier: true },
            Vec3::Z,
            &config,
            delta,
        );
        prop_assert!((fast.length() - 2.0 * normal.length()).abs() <= 1e-6 * fast.length().max(1.0));
    }

    #[test]
    fn test_alias_idempotence(repeats in 1usize..5) {
        let model = Model::new("peter", Skeleton::default(), 1);
        let mut mixer = AnimationMixer::new(&model);
        let mut registry = ClipRegistry::new();

        let handle = mixer.clip_action(&AnimationClip::new("WalkingBackwards", 1.0));
        registry.register("WalkingBackwards", handle);

        for _ in 0..repeats {
            registry.alias("WalkBackward", "WalkingBackwards");
            prop_assert_eq!(registry.resolve("WalkBackward"), Some(handle));
        }
        prop_assert_eq!(registry.len(), 2);
        prop_assert_eq!(registry.names().filter(|n| *n == "WalkBackward").count(), 1);
    }
}
