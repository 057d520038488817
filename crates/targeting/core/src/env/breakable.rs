//! Mutating collaborators used by destructive area effects.
//!
//! Unlike the read-only oracles these are borrowed mutably for the duration of
//! one [`crate::AreaBreaker::break_block`] call, which must run on the thread
//! that owns world mutation.

use crate::geometry::{BlockRef, Location};

use super::rng::RngOracle;

/// Voxel storage that knows which blocks may be destroyed.
pub trait BreakableWorld {
    /// Breakable resistance of `block`, or `None` when it cannot be broken.
    fn breakable(&self, block: BlockRef) -> Option<f64>;

    fn clear_breakable(&mut self, block: BlockRef);

    /// Drops any reflective marker on `block`.
    fn clear_reflective(&mut self, block: BlockRef);

    /// Sets `block` to empty.
    fn clear_block(&mut self, block: BlockRef);
}

/// Undo/recording collaborator; receives each block before it is cleared.
pub trait UndoRecorder {
    fn record(&mut self, block: BlockRef);
}

/// Audiovisual playback collaborator.
pub trait EffectSink {
    fn play(&mut self, effect: &str, origin: &Location, target: &Location);
}

/// Everything one area break needs.
pub struct BreakContext<'a> {
    pub world: &'a mut dyn BreakableWorld,
    pub undo: Option<&'a mut dyn UndoRecorder>,
    pub effects: Option<&'a mut dyn EffectSink>,
    pub rng: &'a dyn RngOracle,
    /// Seed for the single-charge roll; see [`super::compute_seed`].
    pub seed: u64,
    /// Where the caster stands, used as the effect origin.
    pub origin: Location,
}

impl<'a> BreakContext<'a> {
    pub fn new(
        world: &'a mut dyn BreakableWorld,
        rng: &'a dyn RngOracle,
        seed: u64,
        origin: Location,
    ) -> Self {
        Self {
            world,
            undo: None,
            effects: None,
            rng,
            seed,
            origin,
        }
    }

    #[must_use]
    pub fn with_undo(mut self, undo: &'a mut dyn UndoRecorder) -> Self {
        self.undo = Some(undo);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: &'a mut dyn EffectSink) -> Self {
        self.effects = Some(effects);
        self
    }
}
