//! Discrete ray marching through voxel space.
//!
//! [`BlockSteps`] is an Amanatides & Woo DDA walk yielding every voxel the aim
//! ray passes through, starting with the voxel that contains the origin.
//! [`BlockRayMarcher`] drives it with a stopping predicate and keeps the
//! three-deep block history the resolver reads from.
use glam::{DVec3, IVec3};

use crate::env::{CastPolicy, WorldOracle};
use crate::error::{ErrorSeverity, TargetingError};
use crate::geometry::{BlockFace, BlockRef, Location, WorldId};
use crate::target::TargetingResult;

/// Why a step iterator could not be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RayError {
    #[error("aim direction is zero or not finite")]
    DegenerateDirection,

    #[error("ray origin is not finite")]
    DegenerateOrigin,
}

impl TargetingError for RayError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DegenerateDirection => "RAY_DEGENERATE_DIRECTION",
            Self::DegenerateOrigin => "RAY_DEGENERATE_ORIGIN",
        }
    }
}

/// Voxels along a ray, bounded by distance, world height and a step cap.
#[derive(Clone, Debug)]
pub struct BlockSteps {
    world: WorldId,
    cell: IVec3,
    step: IVec3,
    t_max: DVec3,
    t_delta: DVec3,
    max_distance: f64,
    max_height: i32,
    remaining: u32,
    started: bool,
}

impl BlockSteps {
    /// Safety cap on yielded voxels; a ray crosses at most three per unit length.
    pub const MAX_STEPS: u32 = 1024;

    /// Builds the walk from `origin` along its facing.
    ///
    /// The origin height is clamped into `[0, max_height]` first.
    ///
    /// # Errors
    ///
    /// Returns a [`RayError`] when the origin or direction is degenerate.
    pub fn new(origin: &Location, max_distance: f64, max_height: i32) -> Result<Self, RayError> {
        let mut position = origin.position;
        if !position.is_finite() {
            return Err(RayError::DegenerateOrigin);
        }
        position.y = position.y.clamp(0.0, f64::from(max_height));

        let direction = origin.direction();
        if !direction.is_finite() || direction.length_squared() <= 1e-18 {
            return Err(RayError::DegenerateDirection);
        }
        let direction = direction.normalize();

        let cell = position.floor().as_ivec3();
        let mut step = IVec3::ZERO;
        let mut t_max = DVec3::splat(f64::INFINITY);
        let mut t_delta = DVec3::splat(f64::INFINITY);
        for axis in 0..3 {
            let dir = direction[axis];
            if dir == 0.0 {
                continue;
            }
            let p = position[axis];
            let fraction = p - p.floor();
            let to_boundary = if dir > 0.0 { 1.0 - fraction } else { fraction };
            step[axis] = if dir > 0.0 { 1 } else { -1 };
            t_max[axis] = to_boundary / dir.abs();
            t_delta[axis] = 1.0 / dir.abs();
        }

        let steps_for_distance = (max_distance.max(0.0) * 3.0).ceil() as u32 + 3;
        Ok(Self {
            world: origin.world,
            cell,
            step,
            t_max,
            t_delta,
            max_distance,
            max_height,
            remaining: steps_for_distance.min(Self::MAX_STEPS),
            started: false,
        })
    }

    fn within_height(&self) -> bool {
        (0..=self.max_height).contains(&self.cell.y)
    }
}

impl Iterator for BlockSteps {
    type Item = BlockRef;

    fn next(&mut self) -> Option<BlockRef> {
        if self.remaining == 0 {
            return None;
        }
        if self.started {
            let t_max = self.t_max;
            let axis = if t_max.x <= t_max.y && t_max.x <= t_max.z {
                0
            } else if t_max.y <= t_max.z {
                1
            } else {
                2
            };
            if t_max[axis] > self.max_distance {
                self.remaining = 0;
                return None;
            }
            self.cell[axis] += self.step[axis];
            self.t_max[axis] += self.t_delta[axis];
        }
        self.started = true;
        if !self.within_height() {
            self.remaining = 0;
            return None;
        }
        self.remaining -= 1;
        Some(BlockRef::new(self.world, self.cell))
    }
}

/// Three-deep history of visited blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RayState {
    pub current: Option<BlockRef>,
    pub previous: Option<BlockRef>,
    pub previous_previous: Option<BlockRef>,
}

impl RayState {
    /// Shifts the window and records `next` as the current block.
    pub fn advance(&mut self, next: Option<BlockRef>) -> Option<BlockRef> {
        self.previous_previous = self.previous;
        self.previous = self.current;
        self.current = next;
        next
    }

    /// Undoes one advance after running off the end of the ray.
    pub fn back_up(&mut self) {
        self.current = self.previous;
        self.previous = self.previous_previous;
    }
}

/// Outcome of one march.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayMarch {
    pub state: RayState,
    pub result: TargetingResult,
    /// Voxels pulled from the step iterator.
    pub steps: u32,
    /// False when the step iterator could not be built.
    pub initialized: bool,
}

impl RayMarch {
    pub fn block(&self) -> Option<BlockRef> {
        self.state.current
    }
}

/// Walks the aim ray until the stopping predicate accepts a block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockRayMarcher {
    /// Blocks to skip before the predicate applies.
    pub min_offset: u32,
    /// Stop where an actor could stand rather than at the first targetable block.
    pub space_required: bool,
    pub y_offset: f64,
}

impl BlockRayMarcher {
    pub fn new(min_offset: u32, space_required: bool, y_offset: f64) -> Self {
        Self {
            min_offset,
            space_required,
            y_offset,
        }
    }

    /// Marches from `source` for `range` blocks.
    ///
    /// A degenerate ray is not an error here: the march reports
    /// `initialized == false`, keeps whatever history `state` already held and
    /// leaves the classification untouched.
    pub fn march<W, P>(
        &self,
        world: &W,
        policy: &P,
        source: &Location,
        range: f64,
        state: RayState,
    ) -> RayMarch
    where
        W: WorldOracle + ?Sized,
        P: CastPolicy + ?Sized,
    {
        let mut march = RayMarch {
            state,
            result: TargetingResult::None,
            steps: 0,
            initialized: true,
        };

        let end = source.position + source.direction() * range;
        if end.is_finite() && end.floor().as_ivec3() == source.block_pos() {
            let block = source.block();
            march.state.current = Some(block);
            march.result = if policy.is_targetable(block) {
                TargetingResult::Block
            } else {
                TargetingResult::Miss
            };
            return march;
        }

        let origin = source.offset(DVec3::new(0.0, self.y_offset, 0.0));
        let max_height = world.max_height(source.world);
        let mut steps = match BlockSteps::new(&origin, range.ceil(), max_height) {
            Ok(steps) => steps,
            Err(error) => {
                tracing::warn!(target: "targeting", %error, "could not build block iterator, reusing last block");
                march.initialized = false;
                return march;
            }
        };

        let mut skip = self.min_offset;
        march.result = TargetingResult::Block;
        let mut block = march.state.advance(steps.next());
        while let Some(candidate) = block {
            march.steps += 1;
            if skip == 0 {
                if self.accepts(policy, candidate) {
                    break;
                }
            } else {
                skip -= 1;
            }
            block = march.state.advance(steps.next());
        }
        if block.is_none() {
            march.result = TargetingResult::Miss;
            march.state.back_up();
        }
        march
    }

    fn accepts<P: CastPolicy + ?Sized>(&self, policy: &P, block: BlockRef) -> bool {
        if self.space_required {
            !policy.allow_pass_through(block)
                || (policy.is_ok_to_stand_in(block)
                    && policy.is_ok_to_stand_in(block.relative(BlockFace::Up)))
        } else {
            policy.is_targetable(block)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Flat {
        max_height: i32,
    }

    impl WorldOracle for Flat {
        fn max_height(&self, _world: WorldId) -> i32 {
            self.max_height
        }

        fn world_named(&self, _name: &str) -> Option<WorldId> {
            None
        }

        fn world_name(&self, _world: WorldId) -> Option<&str> {
            None
        }
    }

    /// Solid set; everything else is air.
    struct Solids(HashSet<IVec3>);

    impl CastPolicy for Solids {
        fn is_targetable(&self, block: BlockRef) -> bool {
            self.0.contains(&block.pos)
        }

        fn allow_pass_through(&self, _block: BlockRef) -> bool {
            true
        }

        fn is_ok_to_stand_in(&self, block: BlockRef) -> bool {
            !self.0.contains(&block.pos)
        }

        fn is_ok_to_stand_on(&self, block: BlockRef) -> bool {
            self.0.contains(&block.pos)
        }
    }

    fn north_from(x: f64, y: f64, z: f64) -> Location {
        Location::new(WorldId(0), DVec3::new(x, y, z))
    }

    const WORLD: Flat = Flat { max_height: 255 };

    #[test]
    fn steps_start_at_origin_and_follow_axis() {
        let steps: Vec<IVec3> = BlockSteps::new(&north_from(0.5, 64.5, 0.5), 3.0, 255)
            .unwrap()
            .map(|block| block.pos)
            .collect();
        assert_eq!(
            steps,
            vec![
                IVec3::new(0, 64, 0),
                IVec3::new(0, 64, 1),
                IVec3::new(0, 64, 2),
                IVec3::new(0, 64, 3),
            ]
        );
    }

    #[test]
    fn steps_are_face_connected_on_diagonals() {
        let origin = north_from(0.5, 64.5, 0.5).with_rotation(-45.0, 30.0);
        let blocks: Vec<IVec3> = BlockSteps::new(&origin, 8.0, 255)
            .unwrap()
            .map(|block| block.pos)
            .collect();
        assert!(blocks.len() > 8);
        for pair in blocks.windows(2) {
            let delta = pair[1] - pair[0];
            assert_eq!(delta.abs().element_sum(), 1, "{pair:?}");
        }
    }

    #[test]
    fn steps_stop_at_world_floor() {
        let origin = north_from(0.5, 2.5, 0.5).with_rotation(0.0, 90.0);
        let blocks: Vec<i32> = BlockSteps::new(&origin, 10.0, 255)
            .unwrap()
            .map(|block| block.pos.y)
            .collect();
        assert_eq!(blocks, vec![2, 1, 0]);
    }

    #[test]
    fn origin_above_world_is_clamped() {
        let origin = north_from(0.5, 400.0, 0.5);
        let first = BlockSteps::new(&origin, 2.0, 255).unwrap().next().unwrap();
        assert_eq!(first.pos.y, 255);
    }

    #[test]
    fn nan_direction_fails_to_initialize() {
        let origin = north_from(0.5, 64.5, 0.5).with_rotation(f64::NAN, 0.0);
        assert_eq!(
            BlockSteps::new(&origin, 4.0, 255).unwrap_err(),
            RayError::DegenerateDirection
        );
    }

    #[test]
    fn march_stops_at_first_targetable_block() {
        let policy = Solids(HashSet::from([IVec3::new(0, 64, 3), IVec3::new(0, 64, 4)]));
        let march = BlockRayMarcher::default().march(
            &WORLD,
            &policy,
            &north_from(0.0, 64.0, 0.0),
            5.0,
            RayState::default(),
        );
        assert_eq!(march.result, TargetingResult::Block);
        assert_eq!(march.block().unwrap().pos, IVec3::new(0, 64, 3));
        assert_eq!(march.state.previous.unwrap().pos, IVec3::new(0, 64, 2));
        assert_eq!(march.steps, 4);
    }

    #[test]
    fn miss_backs_up_to_last_examined_block() {
        let policy = Solids(HashSet::new());
        let march = BlockRayMarcher::default().march(
            &WORLD,
            &policy,
            &north_from(0.5, 64.5, 0.5),
            3.0,
            RayState::default(),
        );
        assert_eq!(march.result, TargetingResult::Miss);
        assert_eq!(march.block().unwrap().pos, IVec3::new(0, 64, 3));
        assert_eq!(march.state.previous.unwrap().pos, IVec3::new(0, 64, 2));
    }

    #[test]
    fn short_ray_skips_stepping() {
        let policy = Solids(HashSet::from([IVec3::new(0, 64, 0)]));
        let march = BlockRayMarcher::default().march(
            &WORLD,
            &policy,
            &north_from(0.2, 64.2, 0.2),
            0.5,
            RayState::default(),
        );
        assert_eq!(march.steps, 0);
        assert_eq!(march.result, TargetingResult::Block);
        assert_eq!(march.block().unwrap().pos, IVec3::new(0, 64, 0));

        let empty = Solids(HashSet::new());
        let march = BlockRayMarcher::default().march(
            &WORLD,
            &empty,
            &north_from(0.2, 64.2, 0.2),
            0.0,
            RayState::default(),
        );
        assert_eq!(march.steps, 0);
        assert_eq!(march.result, TargetingResult::Miss);
    }

    #[test]
    fn min_offset_skips_leading_blocks() {
        let policy = Solids(HashSet::from([IVec3::new(0, 64, 1), IVec3::new(0, 64, 3)]));
        let march = BlockRayMarcher::new(2, false, 0.0).march(
            &WORLD,
            &policy,
            &north_from(0.5, 64.5, 0.5),
            5.0,
            RayState::default(),
        );
        assert_eq!(march.block().unwrap().pos, IVec3::new(0, 64, 3));
    }

    #[test]
    fn space_required_stops_at_standable_gap() {
        // Everything solid is impassable; the first block with headroom wins.
        struct Wall;
        impl CastPolicy for Wall {
            fn is_targetable(&self, _block: BlockRef) -> bool {
                true
            }
            fn allow_pass_through(&self, block: BlockRef) -> bool {
                block.pos.z != 4
            }
            fn is_ok_to_stand_in(&self, block: BlockRef) -> bool {
                block.pos.z >= 2
            }
            fn is_ok_to_stand_on(&self, _block: BlockRef) -> bool {
                true
            }
        }
        let march = BlockRayMarcher::new(0, true, 0.0).march(
            &WORLD,
            &Wall,
            &north_from(0.5, 64.5, 0.5),
            6.0,
            RayState::default(),
        );
        assert_eq!(march.block().unwrap().pos, IVec3::new(0, 64, 2));
    }

    #[test]
    fn degenerate_ray_keeps_previous_history() {
        let policy = Solids(HashSet::new());
        let held = BlockRef::new(WorldId(0), IVec3::new(9, 9, 9));
        let state = RayState {
            current: Some(held),
            ..RayState::default()
        };
        let source = north_from(0.5, 64.5, 0.5).with_rotation(0.0, f64::NAN);
        let march = BlockRayMarcher::default().march(&WORLD, &policy, &source, 5.0, state);
        assert!(!march.initialized);
        assert_eq!(march.result, TargetingResult::None);
        assert_eq!(march.block(), Some(held));
    }
}
