//! Dynamic objects as the targeting core sees them.
//!
//! Entities are never borrowed from the host. The core works on point-in-time
//! [`EntitySnapshot`]s and refers back to live objects through generation
//! checked [`EntityHandle`]s.
use std::fmt;

use glam::DVec3;

use crate::geometry::{Aabb, BlockRef, Location};

/// Stable reference into the host's entity table.
///
/// A handle whose `generation` no longer matches the slot's current generation
/// refers to an entity that is gone; lookups through
/// [`crate::env::EntityOracle::get`] return `None` for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityHandle {
    pub index: u32,
    pub generation: u32,
}

impl EntityHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Scoring category of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityCategory {
    /// Actor able to cast skills.
    Mage,
    /// Player-controlled actor without casting ability.
    Player,
    /// Scripted actor.
    Npc,
    /// Any other living actor.
    Living,
    /// Items, projectiles, vehicles.
    Inanimate,
}

impl EntityCategory {
    pub const fn is_living(self) -> bool {
        !matches!(self, Self::Inanimate)
    }
}

/// Point-in-time view of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub handle: EntityHandle,
    pub category: EntityCategory,
    /// Feet position and facing.
    pub location: Location,
    /// Eye height above the feet; ignored for inanimate entities.
    pub eye_height: f64,
    pub half_width: f64,
    pub height: f64,
}

impl EntitySnapshot {
    /// Where the entity looks from. Non-living entities use their feet location.
    pub fn eye_location(&self) -> Location {
        if self.category.is_living() {
            self.location.offset(DVec3::new(0.0, self.eye_height, 0.0))
        } else {
            self.location
        }
    }

    pub fn hitbox(&self) -> Aabb {
        let feet = self.location.position;
        Aabb::new(
            feet - DVec3::new(self.half_width, 0.0, self.half_width),
            feet + DVec3::new(self.half_width, self.height, self.half_width),
        )
    }
}

/// The actor initiating a resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Caster {
    /// Live body, if the caster has one.
    pub body: Option<EntityHandle>,
    /// Command block the caster is bound to, when it is a block proxy.
    pub command_block: Option<BlockRef>,
    /// Diagnostic verbosity; scoring details are logged above 5, the query above 8.
    pub debug_level: u8,
}

impl Caster {
    pub fn with_body(body: EntityHandle) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn command_block(block: BlockRef) -> Self {
        Self {
            command_block: Some(block),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_debug_level(mut self, level: u8) -> Self {
        self.debug_level = level;
        self
    }
}
