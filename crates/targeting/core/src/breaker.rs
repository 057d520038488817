//! Budgeted flood destruction for area effects.
//!
//! Breaking a block consumes a charge budget of `ceil(resistance + increment - 1)`
//! where the increment is the whole part of `amount` when `amount > 1`, and
//! otherwise a single charge that lands with probability `amount`. Every
//! destroyed block counts against the budget; what is left spreads to the six
//! face neighbours in [`BlockFace`] order, each neighbour starting its own
//! break with the remaining budget as its amount.
//!
//! The neighbour walk uses an explicit frame stack so the visiting order is
//! exactly depth first without growing the call stack.
use strum::IntoEnumIterator;

use crate::env::{BreakContext, compute_seed};
use crate::geometry::{BlockFace, BlockRef};

/// Effect key played once per top-level break.
pub const BREAK_EFFECT: &str = "break";

#[derive(Clone, Copy, Debug)]
struct Frame {
    block: BlockRef,
    budget: i64,
    broken: i64,
    next_face: usize,
}

/// Destroys blocks around a hit point.
#[derive(Clone, Copy, Debug, Default)]
pub struct AreaBreaker {
    /// Random draws made so far; feeds the seed of the next roll.
    nonce: u64,
}

impl AreaBreaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Breaks `block` and spreads with `amount` charges.
    ///
    /// Returns the number of blocks destroyed. A non-positive amount or an
    /// unbreakable block destroys nothing.
    pub fn break_block(&mut self, ctx: &mut BreakContext<'_>, block: BlockRef, amount: f64) -> u32 {
        let Some(budget) = self.charge(ctx, block, amount) else {
            return 0;
        };
        destroy(ctx, block);
        if let Some(effects) = ctx.effects.as_deref_mut() {
            let at = block.location(0.0, 0.0).offset(glam::DVec3::splat(0.5));
            effects.play(BREAK_EFFECT, &ctx.origin, &at);
        }

        let faces: Vec<BlockFace> = BlockFace::iter().collect();
        let mut stack = vec![Frame {
            block,
            budget,
            broken: 1,
            next_face: 0,
        }];

        loop {
            let Some(frame) = stack.last_mut() else {
                return 0;
            };
            if frame.next_face == faces.len() || frame.broken >= frame.budget {
                let done = stack.pop().map_or(0, |frame| frame.broken);
                match stack.last_mut() {
                    Some(parent) => parent.broken += done,
                    None => return done.clamp(0, i64::from(u32::MAX)) as u32,
                }
                continue;
            }

            let neighbour = frame.block.relative(faces[frame.next_face]);
            frame.next_face += 1;
            let remaining = (frame.budget - frame.broken) as f64;

            if let Some(budget) = self.charge(ctx, neighbour, remaining) {
                destroy(ctx, neighbour);
                stack.push(Frame {
                    block: neighbour,
                    budget,
                    broken: 1,
                    next_face: 0,
                });
            }
        }
    }

    /// Budget granted by breaking `block` with `amount`, if it breaks at all.
    fn charge(&mut self, ctx: &BreakContext<'_>, block: BlockRef, amount: f64) -> Option<i64> {
        if amount <= 0.0 {
            return None;
        }
        let resistance = ctx.world.breakable(block)?;

        let increment = if amount > 1.0 {
            amount.trunc()
        } else {
            // Single charge: the amount is the chance it lands.
            let roll = ctx.rng.unit(compute_seed(ctx.seed, self.nonce, 0, 0));
            self.nonce += 1;
            if roll < amount { 1.0 } else { 0.0 }
        };
        if increment <= 0.0 {
            return None;
        }
        Some((resistance + increment - 1.0).ceil() as i64)
    }
}

fn destroy(ctx: &mut BreakContext<'_>, block: BlockRef) {
    if let Some(undo) = ctx.undo.as_deref_mut() {
        undo.record(block);
    }
    ctx.world.clear_breakable(block);
    ctx.world.clear_reflective(block);
    ctx.world.clear_block(block);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use glam::IVec3;

    use super::*;
    use crate::env::{BreakableWorld, EffectSink, PcgRng, RngOracle, UndoRecorder};
    use crate::geometry::{Location, WorldId};

    #[derive(Default)]
    struct Rubble {
        resistance: HashMap<IVec3, f64>,
        cleared: Vec<IVec3>,
    }

    impl Rubble {
        /// Cube of side `2 * half + 1` centred on the origin.
        fn cube(half: i32, resistance: f64) -> Self {
            let mut rubble = Self::default();
            for x in -half..=half {
                for y in -half..=half {
                    for z in -half..=half {
                        rubble.resistance.insert(IVec3::new(x, y, z), resistance);
                    }
                }
            }
            rubble
        }
    }

    impl BreakableWorld for Rubble {
        fn breakable(&self, block: BlockRef) -> Option<f64> {
            self.resistance.get(&block.pos).copied()
        }

        fn clear_breakable(&mut self, block: BlockRef) {
            self.resistance.remove(&block.pos);
        }

        fn clear_reflective(&mut self, _block: BlockRef) {}

        fn clear_block(&mut self, block: BlockRef) {
            self.cleared.push(block.pos);
        }
    }

    #[derive(Default)]
    struct Journal(Vec<IVec3>);

    impl UndoRecorder for Journal {
        fn record(&mut self, block: BlockRef) {
            self.0.push(block.pos);
        }
    }

    #[derive(Default)]
    struct Played(Vec<(String, Location)>);

    impl EffectSink for Played {
        fn play(&mut self, effect: &str, _origin: &Location, target: &Location) {
            self.0.push((effect.to_owned(), *target));
        }
    }

    /// Always returns the same draw.
    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn origin() -> BlockRef {
        BlockRef::new(WorldId(0), IVec3::ZERO)
    }

    fn caster() -> Location {
        Location::new(WorldId(0), glam::DVec3::new(0.5, 70.0, 0.5))
    }

    fn run(world: &mut Rubble, rng: &dyn RngOracle, amount: f64) -> u32 {
        let mut ctx = BreakContext::new(world, rng, 7, caster());
        AreaBreaker::new().break_block(&mut ctx, origin(), amount)
    }

    #[test]
    fn zero_amount_does_nothing() {
        let mut world = Rubble::cube(2, 1.0);
        let mut undo = Journal::default();
        let mut effects = Played::default();
        let mut ctx = BreakContext::new(&mut world, &PcgRng, 7, caster())
            .with_undo(&mut undo)
            .with_effects(&mut effects);
        assert_eq!(AreaBreaker::new().break_block(&mut ctx, origin(), 0.0), 0);
        assert!(undo.0.is_empty());
        assert!(effects.0.is_empty());
        assert!(world.cleared.is_empty());
    }

    #[test]
    fn unbreakable_block_does_nothing() {
        let mut world = Rubble::default();
        assert_eq!(run(&mut world, &PcgRng, 5.0), 0);
        assert!(world.cleared.is_empty());
    }

    #[test]
    fn three_charges_on_soft_blocks() {
        let mut world = Rubble::cube(2, 1.0);
        let broken = run(&mut world, &PcgRng, 3.0);
        assert!((1..=7).contains(&broken));
        // Origin, then up twice: the first neighbour takes the whole remainder.
        assert_eq!(broken, 3);
        assert_eq!(
            world.cleared,
            vec![IVec3::ZERO, IVec3::new(0, 1, 0), IVec3::new(0, 2, 0)]
        );
    }

    #[test]
    fn more_charges_never_break_less() {
        let mut last = 0;
        for amount in [0.0, 1.0, 2.0, 3.0, 4.0, 6.0, 9.0] {
            let mut world = Rubble::cube(3, 1.0);
            let broken = run(&mut world, &PcgRng, amount);
            assert!(broken >= last, "amount {amount} broke {broken} < {last}");
            last = broken;
        }
    }

    #[test]
    fn every_destroyed_block_is_recorded_before_clearing() {
        let mut world = Rubble::cube(2, 1.0);
        let mut undo = Journal::default();
        let mut effects = Played::default();
        let broken = {
            let mut ctx = BreakContext::new(&mut world, &PcgRng, 7, caster())
                .with_undo(&mut undo)
                .with_effects(&mut effects);
            AreaBreaker::new().break_block(&mut ctx, origin(), 4.0)
        };
        assert_eq!(undo.0.len() as u32, broken);
        assert_eq!(undo.0, world.cleared);
        assert_eq!(effects.0.len(), 1);
        assert_eq!(effects.0[0].0, BREAK_EFFECT);
        assert_eq!(effects.0[0].1.position, glam::DVec3::splat(0.5));
    }

    #[test]
    fn single_charge_lands_below_the_chance() {
        let mut world = Rubble::cube(1, 1.0);
        assert_eq!(run(&mut world, &Fixed(0), 0.5), 1);
    }

    #[test]
    fn single_charge_misses_above_the_chance() {
        let mut world = Rubble::cube(1, 1.0);
        assert_eq!(run(&mut world, &Fixed(u32::MAX), 0.5), 0);
        assert!(world.cleared.is_empty());
    }

    #[test]
    fn seeded_single_charge_is_repeatable() {
        let first = run(&mut Rubble::cube(1, 1.0), &PcgRng, 0.5);
        let second = run(&mut Rubble::cube(1, 1.0), &PcgRng, 0.5);
        assert_eq!(first, second);
        assert!(first <= 1);
    }

    #[test]
    fn hard_blocks_spread_further() {
        // Resistance above one adds charges of its own.
        let mut world = Rubble::cube(2, 2.0);
        let broken = run(&mut world, &PcgRng, 2.0);
        assert!(broken > 1);
    }
}
