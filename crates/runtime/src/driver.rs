//! One cast attempt, end to end.
//!
//! The driver plays the part of the cast lifecycle around the targeting core:
//! it opens a resolution session from the caster's eye, resolves within the
//! skill's range and, for destructive skills that hit a block, hands the block
//! to the area breaker.
use targeting_content::SkillDefinition;
use targeting_core::{EntityHandle, Location, Resolution, TargetingResult, compute_seed};

use crate::error::Result;
use crate::oracle::{EffectLog, UndoList};
use crate::sandbox::Sandbox;

/// What a cast did.
#[derive(Clone, Debug)]
pub struct CastOutcome {
    pub skill: String,
    pub source: Location,
    pub resolution: Resolution,
    /// Blocks destroyed by the area breaker.
    pub broken_blocks: u32,
    /// Removed blocks, restorable through [`UndoList::undo`].
    pub undo: UndoList,
    pub effects: EffectLog,
}

/// Runs casts against a [`Sandbox`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CastDriver {
    /// Casts run so far; part of every cast seed.
    casts: u64,
}

impl CastDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn casts(&self) -> u64 {
        self.casts
    }

    /// Resolves `skill` and applies its destructive charge, if any.
    pub fn cast(&mut self, sandbox: &mut Sandbox, skill: &SkillDefinition) -> Result<CastOutcome> {
        let source = sandbox.source();
        let resolver = skill.resolver();
        let resolution = {
            let env = sandbox.env();
            resolver.start(source).target(&env, skill.range)?
        };

        let actor = sandbox.caster().body.map_or(0, |body| body.index);
        let seed = compute_seed(sandbox.seed(), self.casts, actor, 0);
        self.casts += 1;

        let mut undo = UndoList::default();
        let mut effects = EffectLog::default();
        let mut broken_blocks = 0;
        if let (Some(amount), Some(block)) = (skill.break_amount, resolution.target.block_ref()) {
            if skill.is_destructive() && resolution.result == TargetingResult::Block {
                undo = UndoList::watching(sandbox.worlds());
                broken_blocks = sandbox.break_block(block, amount, seed, &mut undo, &mut effects);
            }
        }

        tracing::info!(
            skill = %skill.name,
            result = %resolution.result,
            entity = ?resolution.target.entity_handle(),
            block = ?resolution.target.block_ref(),
            broken_blocks,
            "cast resolved"
        );

        Ok(CastOutcome {
            skill: skill.name.clone(),
            source,
            resolution,
            broken_blocks,
            undo,
            effects,
        })
    }

    /// The `count` best entity targets of `skill`; a negative count returns all.
    pub fn select(&self, sandbox: &Sandbox, skill: &SkillDefinition, count: i32) -> Result<Vec<EntityHandle>> {
        let env = sandbox.env();
        let resolver = skill.resolver();
        let mut session = resolver.start(sandbox.source());
        session.target(&env, skill.range)?;
        Ok(session.target_entities(&env, skill.range, count)?)
    }
}
