//! Scene loader.
//!
//! Scenes are RON files describing worlds, placed blocks, entities and the
//! casting actor. Every name referenced by a block, entity or the caster must
//! match a declared world.

use std::collections::HashSet;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scene::Scene;

/// Loader for scenes from RON files.
pub struct SceneLoader;

impl SceneLoader {
    /// Load a scene from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scene> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load scene {}: {}", path.display(), e))
    }

    /// Parse and validate a scene from RON text.
    pub fn parse(content: &str) -> LoadResult<Scene> {
        let scene: Scene = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scene RON: {}", e))?;
        Self::validate(&scene)?;
        Ok(scene)
    }

    fn validate(scene: &Scene) -> LoadResult<()> {
        anyhow::ensure!(!scene.worlds.is_empty(), "scene declares no worlds");

        let mut names = HashSet::new();
        for world in &scene.worlds {
            anyhow::ensure!(
                names.insert(world.name.as_str()),
                "world '{}' declared twice",
                world.name
            );
            anyhow::ensure!(
                world.max_height >= 0,
                "world '{}' has a negative max height",
                world.name
            );
        }

        let known = |name: &str| names.contains(name);
        for block in &scene.blocks {
            anyhow::ensure!(
                known(&block.world),
                "block at {:?} references unknown world '{}'",
                block.pos,
                block.world
            );
        }
        for entity in &scene.entities {
            anyhow::ensure!(
                known(&entity.world),
                "entity {:?} references unknown world '{}'",
                entity.name,
                entity.world
            );
        }
        anyhow::ensure!(
            known(&scene.caster.world),
            "caster references unknown world '{}'",
            scene.caster.world
        );
        Ok(())
    }
}
