use super::Targeting;
use crate::env::{OracleError, TargetingEnv, WorldOracle};
use crate::geometry::WorldId;
use crate::target::Target;

/// Resolves a world override against `current`.
///
/// `~suffix` names the world called `<current name>suffix`.
pub(crate) fn override_world<W>(world: &W, current: WorldId, name: &str) -> Option<WorldId>
where
    W: WorldOracle + ?Sized,
{
    match name.strip_prefix('~') {
        Some(suffix) => {
            let base = world.world_name(current)?;
            world.world_named(&format!("{base}{suffix}"))
        }
        None => world.world_named(name),
    }
}

impl Targeting<'_> {
    /// Offset, then direction, then world.
    pub(super) fn post_process(
        &self,
        env: &TargetingEnv<'_>,
        mut target: Target,
    ) -> Result<Target, OracleError> {
        if let Some(offset) = self.config.location_offset {
            target = target.offset_by(offset);
        }
        if let Some(direction) = self.config.direction_override {
            target = target.facing(direction);
        }
        if let Some(name) = &self.config.world_override {
            let current = target.location().world;
            match override_world(env.world()?, current, name) {
                Some(world) => target = target.in_world(world),
                None => {
                    tracing::warn!(
                        target: "targeting",
                        world = %name,
                        "unknown override world, keeping current"
                    );
                }
            }
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named;

    impl WorldOracle for Named {
        fn max_height(&self, _world: WorldId) -> i32 {
            255
        }

        fn world_named(&self, name: &str) -> Option<WorldId> {
            match name {
                "overworld" => Some(WorldId(0)),
                "overworld_nether" => Some(WorldId(1)),
                _ => None,
            }
        }

        fn world_name(&self, world: WorldId) -> Option<&str> {
            match world.0 {
                0 => Some("overworld"),
                1 => Some("overworld_nether"),
                _ => None,
            }
        }
    }

    #[test]
    fn absolute_name_resolves() {
        assert_eq!(override_world(&Named, WorldId(1), "overworld"), Some(WorldId(0)));
    }

    #[test]
    fn tilde_appends_to_current_name() {
        assert_eq!(override_world(&Named, WorldId(0), "~_nether"), Some(WorldId(1)));
    }

    #[test]
    fn unknown_names_resolve_to_nothing() {
        assert_eq!(override_world(&Named, WorldId(0), "moon"), None);
        assert_eq!(override_world(&Named, WorldId(7), "~_nether"), None);
    }
}
