use crate::geometry::WorldId;

/// Static description of the worlds known to the host.
pub trait WorldOracle: Send + Sync {
    /// Highest valid voxel `y` in `world`. Rays are clamped to `[0, max_height]`.
    fn max_height(&self, world: WorldId) -> i32;

    fn world_named(&self, name: &str) -> Option<WorldId>;

    fn world_name(&self, world: WorldId) -> Option<&str>;
}
