//! Content factory for loading skills and scenes from a data directory.

use std::path::{Path, PathBuf};

use crate::loaders::{LoadResult, SceneLoader, SkillLoader};
use crate::scene::Scene;
use crate::skill::SkillCatalog;

/// Content factory that loads all targeting content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── skills.toml
/// └── scenes/
///     ├── corridor.ron
///     └── quarry.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the skill catalog from `skills.toml`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        SkillLoader::load(&self.data_dir.join("skills.toml"))
    }

    /// Load a scene from `scenes/{scene_name}.ron`.
    pub fn load_scene(&self, scene_name: &str) -> LoadResult<Scene> {
        let path = self
            .data_dir
            .join("scenes")
            .join(format!("{}.ron", scene_name));
        SceneLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_from_the_expected_layout() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir(dir.path().join("scenes")).expect("scenes dir");
        std::fs::write(
            dir.path().join("skills.toml"),
            "[skills.look]\n[skills.look.parameters]\ntarget = \"any\"\n",
        )
        .expect("write skills");
        std::fs::write(
            dir.path().join("scenes").join("empty.ron"),
            r#"(worlds: [(name: "w")], caster: (world: "w", position: (0.0, 64.0, 0.0)))"#,
        )
        .expect("write scene");

        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_skills().expect("skills").get("look").is_some());
        assert_eq!(factory.load_scene("empty").expect("scene").worlds.len(), 1);
        assert!(factory.load_scene("missing").is_err());
    }
}
