//! Resolution outcome types.
//!
//! - [`TargetType`]: the policy a skill asks the resolver to apply
//! - [`TargetingResult`]: how the last resolution was classified
//! - [`Target`]: the resolved location plus optional block/entity references
mod kind;

pub use kind::{TargetType, TargetingResult};

use glam::DVec3;

use crate::entity::EntityHandle;
use crate::geometry::{BlockRef, Location, WorldId};

/// Result record of one resolution.
///
/// Constructed fresh per resolution and never mutated in place; the post
/// processing steps (offset, direction, world) return new values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    location: Location,
    block: Option<BlockRef>,
    entity: Option<EntityHandle>,
    score: f64,
    distance_squared: f64,
}

impl Target {
    /// Bare location, no block or entity.
    pub fn at(location: Location) -> Self {
        Self {
            location,
            block: None,
            entity: None,
            score: 0.0,
            distance_squared: 0.0,
        }
    }

    /// Block target seen from `source`.
    ///
    /// The location is the block's minimum corner carrying the source's
    /// orientation; distance is measured to the block centre.
    pub fn block(source: &Location, block: BlockRef) -> Self {
        let distance_squared = if source.world == block.world {
            source.position.distance_squared(block.center())
        } else {
            f64::INFINITY
        };
        Self {
            location: block.location(source.yaw, source.pitch),
            block: Some(block),
            entity: None,
            score: 0.0,
            distance_squared,
        }
    }

    /// Entity target at `location` with the score it was picked by.
    pub fn entity(source: &Location, entity: EntityHandle, location: Location, score: f64) -> Self {
        Self {
            location,
            block: None,
            entity: Some(entity),
            score,
            distance_squared: source.distance_squared(&location),
        }
    }

    /// Caster body at `source`, optionally remembering the block the ray found.
    pub fn caster(source: &Location, body: Option<EntityHandle>, block: Option<BlockRef>) -> Self {
        Self {
            location: *source,
            block,
            entity: body,
            score: 0.0,
            distance_squared: 0.0,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn block_ref(&self) -> Option<BlockRef> {
        self.block
    }

    pub fn entity_handle(&self) -> Option<EntityHandle> {
        self.entity
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn distance_squared(&self) -> f64 {
        self.distance_squared
    }

    pub fn has_entity(&self) -> bool {
        self.entity.is_some()
    }

    pub fn has_block(&self) -> bool {
        self.block.is_some()
    }

    #[must_use]
    pub fn offset_by(mut self, delta: DVec3) -> Self {
        self.location = self.location.offset(delta);
        self
    }

    #[must_use]
    pub fn facing(mut self, direction: DVec3) -> Self {
        self.location = self.location.with_direction(direction);
        self
    }

    #[must_use]
    pub fn in_world(mut self, world: WorldId) -> Self {
        self.location = self.location.with_world(world);
        self
    }
}
