//! Searching for a spot an actor can occupy near a target.
use crate::env::{CastPolicy, OracleError, TargetingEnv, WorldOracle};
use crate::geometry::{BlockFace, BlockRef, Location};

/// Default lowest and highest `y` a stand search will consider.
pub const DEFAULT_STAND_RANGE: (i32, i32) = (4, 253);

/// How far below the target the first, short downward scan looks.
const SHORT_DROP: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scan {
    Up,
    Down,
}

/// Whether an actor can stand in `block`: solid footing below, room for the
/// body in this block and the one above, and within world height.
pub fn is_safe<W, P>(world: &W, policy: &P, block: BlockRef) -> bool
where
    W: WorldOracle + ?Sized,
    P: CastPolicy + ?Sized,
{
    block.pos.y <= world.max_height(block.world)
        && policy.is_ok_to_stand_on(block.relative(BlockFace::Down))
        && policy.is_ok_to_stand_in(block)
        && policy.is_ok_to_stand_in(block.relative(BlockFace::Up))
}

/// Nearest safe location to `target` within `[min_y, max_y]`, if any.
///
/// A safe target is returned as is. A target outside the band is moved to the
/// nearest edge and scanned inward. Otherwise the search looks a few blocks
/// down, then up, then all the way down; each column scan gives up at the
/// first block that cannot be passed through.
///
/// # Errors
///
/// Returns an [`OracleError`] when the world oracle or policy is missing.
pub fn find_place_to_stand(
    env: &TargetingEnv<'_>,
    target: &Location,
    min_y: i32,
    max_y: i32,
) -> Result<Option<Location>, OracleError> {
    let world = env.world()?;
    let policy = env.policy()?;

    let y = target.block_pos().y;
    if (min_y..=max_y).contains(&y) && is_safe(world, policy, target.block()) {
        return Ok(Some(*target));
    }

    let found = if y < min_y {
        scan(world, policy, at_height(target, min_y), Scan::Up, min_y, max_y)
    } else if y > max_y {
        scan(world, policy, at_height(target, max_y), Scan::Down, min_y, max_y)
    } else {
        scan(world, policy, *target, Scan::Down, min_y.max(y - SHORT_DROP), max_y)
            .or_else(|| scan(world, policy, *target, Scan::Up, min_y, max_y))
            .or_else(|| scan(world, policy, *target, Scan::Down, min_y, max_y))
    };
    Ok(found)
}

/// Like [`find_place_to_stand`] over [`DEFAULT_STAND_RANGE`], falling back to
/// the target itself.
///
/// # Errors
///
/// Returns an [`OracleError`] when the world oracle or policy is missing.
pub fn try_find_place_to_stand(
    env: &TargetingEnv<'_>,
    target: &Location,
) -> Result<Location, OracleError> {
    let (min_y, max_y) = DEFAULT_STAND_RANGE;
    Ok(find_place_to_stand(env, target, min_y, max_y)?.unwrap_or(*target))
}

fn at_height(location: &Location, y: i32) -> Location {
    let mut moved = *location;
    moved.position.y = f64::from(y);
    moved
}

fn scan<W, P>(world: &W, policy: &P, start: Location, direction: Scan, min_y: i32, max_y: i32) -> Option<Location>
where
    W: WorldOracle + ?Sized,
    P: CastPolicy + ?Sized,
{
    let step = match direction {
        Scan::Up => 1.0,
        Scan::Down => -1.0,
    };
    let mut probe = start;
    while f64::from(min_y) <= probe.position.y && probe.position.y <= f64::from(max_y) {
        let block = probe.block();
        if is_safe(world, policy, block) {
            return Some(probe);
        }
        if !policy.allow_pass_through(block) {
            return None;
        }
        probe.position.y += step;
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::{DVec3, IVec3};

    use super::*;
    use crate::entity::{EntityHandle, EntitySnapshot};
    use crate::env::{EntityOracle, Env, PcgRng};
    use crate::geometry::WorldId;

    struct Flat;

    impl WorldOracle for Flat {
        fn max_height(&self, _world: WorldId) -> i32 {
            255
        }

        fn world_named(&self, _name: &str) -> Option<WorldId> {
            None
        }

        fn world_name(&self, _world: WorldId) -> Option<&str> {
            None
        }
    }

    struct Nobody;

    impl EntityOracle for Nobody {
        fn nearby(&self, _center: &Location, _radius: f64) -> Vec<EntitySnapshot> {
            Vec::new()
        }

        fn get(&self, _handle: EntityHandle) -> Option<EntitySnapshot> {
            None
        }
    }

    /// Solid cells block movement; `sealed` cells cannot be passed through either.
    struct Terrain {
        solid: HashSet<IVec3>,
        sealed: HashSet<IVec3>,
    }

    impl Terrain {
        fn floor_at(y: i32) -> Self {
            Self {
                solid: [IVec3::new(0, y, 0)].into_iter().collect(),
                sealed: HashSet::new(),
            }
        }
    }

    impl CastPolicy for Terrain {
        fn is_targetable(&self, block: BlockRef) -> bool {
            self.solid.contains(&block.pos)
        }

        fn allow_pass_through(&self, block: BlockRef) -> bool {
            !self.sealed.contains(&block.pos)
        }

        fn is_ok_to_stand_in(&self, block: BlockRef) -> bool {
            !self.solid.contains(&block.pos)
        }

        fn is_ok_to_stand_on(&self, block: BlockRef) -> bool {
            self.solid.contains(&block.pos)
        }
    }

    fn find(terrain: &Terrain, y: f64) -> Option<Location> {
        let env = Env::with_all(&Flat, &Nobody, terrain, &PcgRng).into_targeting_env();
        let target = Location::new(WorldId(0), DVec3::new(0.5, y, 0.5));
        find_place_to_stand(&env, &target, 4, 253).expect("oracles present")
    }

    #[test]
    fn safe_target_is_kept() {
        let found = find(&Terrain::floor_at(63), 64.0).expect("safe");
        assert_eq!(found.position.y, 64.0);
    }

    #[test]
    fn short_drop_is_tried_first() {
        let found = find(&Terrain::floor_at(60), 63.0).expect("floor below");
        assert_eq!(found.block_pos().y, 61);
    }

    #[test]
    fn looks_up_before_far_down() {
        let mut terrain = Terrain::floor_at(70);
        terrain.solid.insert(IVec3::new(0, 40, 0));
        let found = find(&terrain, 64.0).expect("ledge above");
        assert_eq!(found.block_pos().y, 71);
    }

    #[test]
    fn falls_back_to_a_long_drop() {
        let found = find(&Terrain::floor_at(40), 64.0).expect("floor far below");
        assert_eq!(found.block_pos().y, 41);
    }

    #[test]
    fn sealed_column_stops_the_scan() {
        let mut terrain = Terrain::floor_at(40);
        terrain.sealed.insert(IVec3::new(0, 50, 0));
        terrain.sealed.insert(IVec3::new(0, 80, 0));
        assert_eq!(find(&terrain, 64.0), None);
    }

    #[test]
    fn targets_below_the_band_scan_up_from_its_floor() {
        let found = find(&Terrain::floor_at(5), 1.0).expect("floor inside band");
        assert_eq!(found.block_pos().y, 6);
    }
}
