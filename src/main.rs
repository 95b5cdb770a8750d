use character_locomotion::config::ControllerConfig;
use character_locomotion::core::initialize_logging;
use character_locomotion::prelude::*;
use character_locomotion::resources::block_on;

fn main() {
    if let Err(e) = run() {
        eprintln!("Character demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "gltf")]
fn asset_source() -> Arc<dyn AssetSource> {
    Arc::new(GltfAssetSource::new("."))
}

#[cfg(not(feature = "gltf"))]
fn asset_source() -> Arc<dyn AssetSource> {
    Arc::new(character_locomotion::resources::MemoryAssetSource::new())
}

fn run() -> CharacterResult<()> {
    let mut config = ControllerConfig::load_or_default();
    config.apply_env_overrides();
    initialize_logging(&config.logging);
    config.validate()?;

    let loader = loader_from_config(asset_source(), &config.assets);
    let mut controller = CharacterController::new(loader, Vec3::ZERO, config.locomotion.clone());
    block_on(controller.init())?;

    let bindings = &config.locomotion.key_bindings;
    let script = [
        ("forward", vec![bindings.forward.as_str()]),
        ("forward + modifier", vec![bindings.forward.as_str(), bindings.speed_modifier.as_str()]),
        ("backward", vec![bindings.backward.as_str()]),
        ("idle", vec![]),
    ];

    let delta = 1.0 / 60.0;
    for (label, keys) in &script {
        let input = InputSnapshot::from_keys(keys);
        for _ in 0..30 {
            controller.update(delta, &input)?;
        }
        let position = controller.position();
        println!(
            "{:<20} action={:<14} position=({:.3}, {:.3}, {:.3})",
            label,
            controller.current_action(),
            position.x,
            position.y,
            position.z
        );
    }

    controller.debug_animations();
    controller.dispose();
    Ok(())
}
