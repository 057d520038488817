//! Content loaders for reading skill and scene data from files.
//!
//! Skills come from TOML catalogs, scenes from RON files.

pub mod factory;
pub mod scene;
pub mod skills;

pub use factory::ContentFactory;
pub use scene::SceneLoader;
pub use skills::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
