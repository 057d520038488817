//! Recording collaborators for area breaks.
use targeting_core::{BlockRef, EffectSink, Location, UndoRecorder};

use super::world::{BlockData, VoxelWorlds};

/// Blocks removed by a cast, restorable in reverse order.
///
/// The recorder only sees the block reference, so the list snapshots the
/// voxel data it needs from a copy of the world taken when the cast started.
#[derive(Clone, Debug, Default)]
pub struct UndoList {
    before: Option<VoxelWorlds>,
    removed: Vec<BlockRef>,
}

impl UndoList {
    /// Starts recording against the current state of `worlds`.
    pub fn watching(worlds: &VoxelWorlds) -> Self {
        Self {
            before: Some(worlds.clone()),
            removed: Vec::new(),
        }
    }

    pub fn blocks(&self) -> &[BlockRef] {
        &self.removed
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    /// Puts every recorded block back; returns how many were restored.
    pub fn undo(&mut self, worlds: &mut VoxelWorlds) -> usize {
        let Some(before) = &self.before else {
            return 0;
        };
        let mut restored = 0;
        while let Some(block) = self.removed.pop() {
            if let Some(data) = before.get(block).copied() {
                worlds.set(block, data);
                restored += 1;
            }
        }
        restored
    }

    /// Voxel that was at `block` before the cast.
    pub fn original(&self, block: BlockRef) -> Option<BlockData> {
        self.before.as_ref().and_then(|before| before.get(block).copied())
    }
}

impl UndoRecorder for UndoList {
    fn record(&mut self, block: BlockRef) {
        self.removed.push(block);
    }
}

/// One played effect.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedEffect {
    pub key: String,
    pub origin: Location,
    pub target: Location,
}

/// Effect sink that keeps what was played.
#[derive(Clone, Debug, Default)]
pub struct EffectLog {
    played: Vec<PlayedEffect>,
}

impl EffectLog {
    pub fn played(&self) -> &[PlayedEffect] {
        &self.played
    }
}

impl EffectSink for EffectLog {
    fn play(&mut self, effect: &str, origin: &Location, target: &Location) {
        tracing::debug!(effect, x = target.position.x, y = target.position.y, z = target.position.z, "play effect");
        self.played.push(PlayedEffect {
            key: effect.to_owned(),
            origin: *origin,
            target: *target,
        });
    }
}
