//! The bundled content directory loads and every skill casts in every scene.
use std::path::PathBuf;

use runtime::{CastDriver, Sandbox, SandboxConfig};
use targeting_content::ContentFactory;
use targeting_core::TargetingResult;

fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"))
}

#[test]
fn bundled_skills_cast_in_bundled_scenes() {
    let factory = factory();
    let catalog = factory.load_skills().expect("skills load");
    assert!(!catalog.is_empty());

    for scene_name in ["corridor", "quarry"] {
        let scene = factory.load_scene(scene_name).expect("scene loads");
        for skill in catalog.iter() {
            let mut sandbox =
                Sandbox::from_scene(&scene, &SandboxConfig::default()).expect("scene builds");
            CastDriver::new()
                .cast(&mut sandbox, skill)
                .unwrap_or_else(|e| panic!("{} in {scene_name}: {e}", skill.name));
        }
    }
}

#[test]
fn corridor_look_finds_the_guard() {
    let factory = factory();
    let catalog = factory.load_skills().expect("skills load");
    let scene = factory.load_scene("corridor").expect("scene loads");
    let mut sandbox = Sandbox::from_scene(&scene, &SandboxConfig::default()).expect("scene builds");
    let guard = sandbox.entities().find("guard").expect("guard spawned");

    let look = catalog.get("look").expect("look skill");
    let outcome = CastDriver::new().cast(&mut sandbox, look).expect("cast");
    assert_eq!(outcome.resolution.result, TargetingResult::Entity);
    assert_eq!(outcome.resolution.target.entity_handle(), Some(guard));
}
