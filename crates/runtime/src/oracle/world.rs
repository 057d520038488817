//! Voxel storage served through [`targeting_core::WorldOracle`].
//!
//! The same store answers the block predicates of [`targeting_core::CastPolicy`]
//! and is the mutable target of area breaks, so it is also the scene's
//! permission authority.
use std::collections::HashMap;

use targeting_content::BlockKind;
use targeting_core::{
    BlockPos, BlockRef, BreakableWorld, CastPolicy, EntityCategory, EntitySnapshot, Location,
    WorldId, WorldOracle,
};

use crate::config::CastRules;

/// One non-empty voxel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockData {
    pub kind: BlockKind,
    /// Breakable resistance; `None` means indestructible.
    pub resistance: Option<f64>,
    pub reflective: bool,
}

impl BlockData {
    pub fn solid() -> Self {
        Self {
            kind: BlockKind::Solid,
            resistance: None,
            reflective: false,
        }
    }

    #[must_use]
    pub fn breakable(mut self, resistance: f64) -> Self {
        self.resistance = Some(resistance);
        self
    }
}

#[derive(Clone, Debug)]
struct WorldData {
    name: String,
    max_height: i32,
    blocks: HashMap<BlockPos, BlockData>,
}

/// Every world of a scene. World ids are indices into the list.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorlds {
    worlds: Vec<WorldData>,
    rules: CastRules,
}

impl VoxelWorlds {
    pub fn new(rules: CastRules) -> Self {
        Self {
            worlds: Vec::new(),
            rules,
        }
    }

    /// Adds an empty world and returns its id. A name already taken returns
    /// the existing id.
    pub fn add_world(&mut self, name: impl Into<String>, max_height: i32) -> WorldId {
        let name = name.into();
        if let Some(id) = self.world_named(&name) {
            return id;
        }
        self.worlds.push(WorldData {
            name,
            max_height,
            blocks: HashMap::new(),
        });
        WorldId(self.worlds.len() as u32 - 1)
    }

    pub fn rules(&self) -> &CastRules {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut CastRules {
        &mut self.rules
    }

    /// Places `data` at `block`. Blocks in unknown worlds are ignored.
    pub fn set(&mut self, block: BlockRef, data: BlockData) {
        if let Some(world) = self.worlds.get_mut(block.world.0 as usize) {
            world.blocks.insert(block.pos, data);
        }
    }

    pub fn get(&self, block: BlockRef) -> Option<&BlockData> {
        self.worlds
            .get(block.world.0 as usize)
            .and_then(|world| world.blocks.get(&block.pos))
    }

    pub fn is_empty_at(&self, block: BlockRef) -> bool {
        self.get(block).is_none()
    }

    /// Number of non-empty blocks in `world`.
    pub fn block_count(&self, world: WorldId) -> usize {
        self.worlds
            .get(world.0 as usize)
            .map_or(0, |world| world.blocks.len())
    }

    fn kind(&self, block: BlockRef) -> Option<BlockKind> {
        self.get(block).map(|data| data.kind)
    }
}

impl WorldOracle for VoxelWorlds {
    fn max_height(&self, world: WorldId) -> i32 {
        self.worlds
            .get(world.0 as usize)
            .map_or(0, |world| world.max_height)
    }

    fn world_named(&self, name: &str) -> Option<WorldId> {
        self.worlds
            .iter()
            .position(|world| world.name == name)
            .map(|index| WorldId(index as u32))
    }

    fn world_name(&self, world: WorldId) -> Option<&str> {
        self.worlds
            .get(world.0 as usize)
            .map(|world| world.name.as_str())
    }
}

impl CastPolicy for VoxelWorlds {
    fn can_cast(&self, location: &Location) -> bool {
        let block = location.block();
        !self
            .rules
            .protected
            .iter()
            .any(|region| region.contains(block))
    }

    fn can_target(&self, entity: &EntitySnapshot) -> bool {
        self.rules.pvp || !matches!(entity.category, EntityCategory::Player | EntityCategory::Mage)
    }

    fn targets_caster(&self) -> bool {
        self.rules.targets_caster
    }

    fn is_targetable(&self, block: BlockRef) -> bool {
        matches!(self.kind(block), Some(BlockKind::Solid))
    }

    fn allow_pass_through(&self, block: BlockRef) -> bool {
        matches!(
            self.kind(block),
            None | Some(BlockKind::Liquid | BlockKind::Plant)
        )
    }

    fn is_ok_to_stand_in(&self, block: BlockRef) -> bool {
        matches!(
            self.kind(block),
            None | Some(BlockKind::Liquid | BlockKind::Plant)
        )
    }

    fn is_ok_to_stand_on(&self, block: BlockRef) -> bool {
        matches!(
            self.kind(block),
            Some(BlockKind::Solid | BlockKind::Barrier)
        )
    }
}

impl BreakableWorld for VoxelWorlds {
    fn breakable(&self, block: BlockRef) -> Option<f64> {
        self.get(block).and_then(|data| data.resistance)
    }

    fn clear_breakable(&mut self, block: BlockRef) {
        if let Some(world) = self.worlds.get_mut(block.world.0 as usize) {
            if let Some(data) = world.blocks.get_mut(&block.pos) {
                data.resistance = None;
            }
        }
    }

    fn clear_reflective(&mut self, block: BlockRef) {
        if let Some(world) = self.worlds.get_mut(block.world.0 as usize) {
            if let Some(data) = world.blocks.get_mut(&block.pos) {
                data.reflective = false;
            }
        }
    }

    fn clear_block(&mut self, block: BlockRef) {
        if let Some(world) = self.worlds.get_mut(block.world.0 as usize) {
            world.blocks.remove(&block.pos);
        }
    }
}
