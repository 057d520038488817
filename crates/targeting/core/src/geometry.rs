//! World-space primitives shared by every targeting stage.
//!
//! Axis convention: `+Y` is up, `+X` is east and `+Z` is north. Yaw and pitch
//! are stored in degrees; yaw 0 / pitch 0 aims due north and positive pitch
//! looks down.
use std::fmt;

use glam::{DVec3, IVec3};

/// Integer voxel coordinates.
pub type BlockPos = IVec3;

/// Identifier of a world (dimension) known to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldId(pub u32);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world#{}", self.0)
    }
}

/// One of the six face-adjacent directions of a voxel.
///
/// Iteration order (`BlockFace::iter()`) is up, down, east, west, north, south
/// and is relied on by the area breaker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BlockFace {
    Up,
    Down,
    East,
    West,
    North,
    South,
}

impl BlockFace {
    /// Unit offset of the neighbour on this face.
    pub const fn offset(self) -> BlockPos {
        match self {
            Self::Up => IVec3::new(0, 1, 0),
            Self::Down => IVec3::new(0, -1, 0),
            Self::East => IVec3::new(1, 0, 0),
            Self::West => IVec3::new(-1, 0, 0),
            Self::North => IVec3::new(0, 0, 1),
            Self::South => IVec3::new(0, 0, -1),
        }
    }
}

/// Reference to a single voxel in a specific world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockRef {
    pub world: WorldId,
    pub pos: BlockPos,
}

impl BlockRef {
    pub const fn new(world: WorldId, pos: BlockPos) -> Self {
        Self { world, pos }
    }

    /// Returns the neighbouring block on `face`.
    pub fn relative(self, face: BlockFace) -> Self {
        Self::new(self.world, self.pos + face.offset())
    }

    /// Minimum corner of the voxel in world space.
    pub fn corner(self) -> DVec3 {
        self.pos.as_dvec3()
    }

    /// Centre of the voxel in world space.
    pub fn center(self) -> DVec3 {
        self.pos.as_dvec3() + DVec3::splat(0.5)
    }

    /// Location at the block's minimum corner, carrying the given orientation.
    pub fn location(self, yaw: f64, pitch: f64) -> Location {
        Location::new(self.world, self.corner()).with_rotation(yaw, pitch)
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{},{},{}",
            self.world, self.pos.x, self.pos.y, self.pos.z
        )
    }
}

/// Position plus orientation inside a world.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub world: WorldId,
    pub position: DVec3,
    /// Degrees, 0 = north (+Z), 90 = west (-X).
    pub yaw: f64,
    /// Degrees, positive looks down.
    pub pitch: f64,
}

impl Location {
    pub const fn new(world: WorldId, position: DVec3) -> Self {
        Self {
            world,
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[must_use]
    pub const fn with_rotation(mut self, yaw: f64, pitch: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Re-derives yaw and pitch so that [`Location::direction`] points along `direction`.
    ///
    /// A zero or non-finite vector leaves the orientation untouched.
    #[must_use]
    pub fn with_direction(mut self, direction: DVec3) -> Self {
        if !direction.is_finite() || direction.length_squared() == 0.0 {
            return self;
        }
        let horizontal = (direction.x * direction.x + direction.z * direction.z).sqrt();
        self.yaw = (-direction.x).atan2(direction.z).to_degrees();
        self.pitch = (-direction.y).atan2(horizontal).to_degrees();
        self
    }

    #[must_use]
    pub fn with_world(mut self, world: WorldId) -> Self {
        self.world = world;
        self
    }

    #[must_use]
    pub fn offset(mut self, delta: DVec3) -> Self {
        self.position += delta;
        self
    }

    /// Unit aim vector derived from yaw and pitch.
    pub fn direction(&self) -> DVec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        DVec3::new(
            -yaw.sin() * pitch.cos(),
            -pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
    }

    /// Integer voxel coordinates containing this position.
    pub fn block_pos(&self) -> BlockPos {
        self.position.floor().as_ivec3()
    }

    pub fn block(&self) -> BlockRef {
        BlockRef::new(self.world, self.block_pos())
    }

    pub fn distance_squared(&self, other: &Location) -> f64 {
        self.position.distance_squared(other.position)
    }

    pub fn distance(&self, other: &Location) -> f64 {
        self.position.distance(other.position)
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Grows the box by `padding` on every side.
    #[must_use]
    pub fn inflate(self, padding: f64) -> Self {
        Self::new(self.min - DVec3::splat(padding), self.max + DVec3::splat(padding))
    }

    /// Distance along the ray at which it first enters the box, if that happens
    /// within `[0, max_distance]`. `direction` must be a unit vector.
    ///
    /// Faces are inclusive; a ray starting inside the box enters at 0.
    pub fn ray_enter_distance(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<f64> {
        let mut t_min = 0.0f64;
        let mut t_max = max_distance;
        for axis in 0..3 {
            let start = origin[axis];
            let dir = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if dir.abs() < 1e-12 {
                if start < lo || start > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (lo - start) * inv;
            let mut t1 = (hi - start) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn yaw_zero_aims_north() {
        let loc = Location::new(WorldId(0), DVec3::ZERO);
        let dir = loc.direction();
        assert!((dir - DVec3::Z).length() < 1e-9);
    }

    #[test]
    fn with_direction_inverts_direction() {
        let wanted = DVec3::new(1.0, -2.0, 0.5).normalize();
        let loc = Location::new(WorldId(0), DVec3::ZERO).with_direction(wanted);
        assert!((loc.direction() - wanted).length() < 1e-9);
    }

    #[test]
    fn zero_direction_keeps_orientation() {
        let loc = Location::new(WorldId(0), DVec3::ZERO).with_rotation(45.0, 10.0);
        assert_eq!(loc.with_direction(DVec3::ZERO), loc);
    }

    #[test]
    fn faces_iterate_in_break_order() {
        let order: Vec<BlockFace> = BlockFace::iter().collect();
        assert_eq!(
            order,
            vec![
                BlockFace::Up,
                BlockFace::Down,
                BlockFace::East,
                BlockFace::West,
                BlockFace::North,
                BlockFace::South
            ]
        );
    }

    #[test]
    fn block_pos_floors_negative_coordinates() {
        let loc = Location::new(WorldId(0), DVec3::new(-0.5, 64.0, 2.99));
        assert_eq!(loc.block_pos(), IVec3::new(-1, 64, 2));
    }

    #[test]
    fn ray_hits_box_face_on_boundary() {
        let aabb = Aabb::new(DVec3::new(-0.3, 64.0, 1.7), DVec3::new(0.3, 65.8, 2.3));
        let hit = aabb.ray_enter_distance(DVec3::new(0.0, 64.0, 0.0), DVec3::Z, 5.0);
        assert!((hit.unwrap() - 1.7).abs() < 1e-9);
    }

    #[test]
    fn ray_misses_box_beyond_range() {
        let aabb = Aabb::new(DVec3::new(-0.5, -0.5, 9.5), DVec3::new(0.5, 0.5, 10.5));
        assert!(aabb.ray_enter_distance(DVec3::ZERO, DVec3::Z, 5.0).is_none());
        assert!(aabb.ray_enter_distance(DVec3::ZERO, DVec3::X, 50.0).is_none());
    }

    #[test]
    fn ray_from_inside_box_enters_at_zero() {
        let aabb = Aabb::new(DVec3::splat(-1.0), DVec3::splat(1.0));
        assert_eq!(aabb.ray_enter_distance(DVec3::ZERO, DVec3::Y, 3.0), Some(0.0));
    }
}
