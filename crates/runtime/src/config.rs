//! Sandbox configuration.
use glam::IVec3;
use targeting_core::{BlockRef, WorldId};

/// Inclusive box of blocks in one world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRegion {
    pub world: WorldId,
    pub min: IVec3,
    pub max: IVec3,
}

impl BlockRegion {
    /// Region spanning both corners, in any order.
    pub fn new(world: WorldId, a: IVec3, b: IVec3) -> Self {
        Self {
            world,
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, block: BlockRef) -> bool {
        block.world == self.world
            && block.pos.cmpge(self.min).all()
            && block.pos.cmple(self.max).all()
    }
}

/// Permission rules answered by the sandbox's cast policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastRules {
    /// Regions nobody may cast into.
    pub protected: Vec<BlockRegion>,
    /// Whether players and mages may be targeted.
    pub pvp: bool,
    /// Whether the caster's own body is a candidate.
    pub targets_caster: bool,
}

impl Default for CastRules {
    fn default() -> Self {
        Self {
            protected: Vec::new(),
            pvp: true,
            targets_caster: false,
        }
    }
}

/// Sandbox construction settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SandboxConfig {
    /// Maximum number of live entities.
    pub entity_capacity: usize,
    pub rules: CastRules,
    /// Base seed for casts; every cast derives its own seed from it.
    pub seed: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 1024,
            rules: CastRules::default(),
            seed: 0,
        }
    }
}
