use super::Targeting;
use crate::entity::EntityHandle;
use crate::env::{CastPolicy, OracleError, TargetingEnv};
use crate::geometry::BlockRef;
use crate::ray::BlockRayMarcher;
use crate::target::{Target, TargetType, TargetingResult};

/// Keeps whichever candidate is nearer the source. An exact tie goes to the
/// entity.
pub(crate) fn nearer(block: Target, entity: Target) -> Target {
    if block.distance_squared() < entity.distance_squared() {
        block
    } else {
        entity
    }
}

/// Drops a candidate whose location the policy forbids casting at.
fn castable(policy: &dyn CastPolicy, candidate: Option<Target>) -> Option<Target> {
    candidate.filter(|target| policy.can_cast(target.location()))
}

impl Targeting<'_> {
    pub(super) fn find_target(
        &mut self,
        env: &TargetingEnv<'_>,
        range: f64,
    ) -> Result<Target, OracleError> {
        match self.config.target_type {
            TargetType::None => Ok(Target::at(self.source)),
            TargetType::SelfOnly => self.resolve_self(env),
            kind if kind.is_block() => {
                let target = match self.march(env, range)? {
                    Some(block) => Target::block(&self.source, block),
                    None => Target::at(self.source),
                };
                Ok(target)
            }
            _ => self.resolve_contest(env, range),
        }
    }

    fn resolve_self(&mut self, env: &TargetingEnv<'_>) -> Result<Target, OracleError> {
        if let Some(body) = self.live_body(env)? {
            self.result = TargetingResult::Entity;
            return Ok(Target::caster(&self.source, Some(body), None));
        }
        if let Some(block) = env.caster().command_block {
            return Ok(Target::block(&block.location(0.0, 0.0), block));
        }
        Ok(Target::at(self.source))
    }

    /// Block and entity candidates compete; see the module docs for the order.
    fn resolve_contest(&mut self, env: &TargetingEnv<'_>, range: f64) -> Result<Target, OracleError> {
        let kind = self.config.target_type;
        let block = self.march(env, range)?;
        let block_target = block.map(|block| Target::block(&self.source, block));

        let mut entity_range = range;
        if let Some(target) = &block_target {
            if target.location().world == self.source.world {
                entity_range = entity_range.min(self.source.distance(target.location()));
            }
        }

        // The capped range bounds scoring; `nearer` settles block against entity.
        let entity_target = self.entity_candidates(env, entity_range)?.best().cloned();

        let policy = env.policy()?;
        let block_target = castable(policy, block_target);
        let entity_target = castable(policy, entity_target);

        if entity_target.is_none() {
            match kind {
                TargetType::OtherEntity => {
                    self.result = TargetingResult::Entity;
                    return Ok(Target::at(self.source));
                }
                TargetType::AnyEntity => {
                    self.result = TargetingResult::Entity;
                    let body = self.live_body(env)?;
                    return Ok(Target::caster(&self.source, body, None));
                }
                TargetType::Any => {
                    if let Some(body) = self.live_body(env)? {
                        self.result = TargetingResult::Entity;
                        let incidental = block_target.as_ref().and_then(Target::block_ref);
                        return Ok(Target::caster(&self.source, Some(body), incidental));
                    }
                }
                _ => {}
            }
        }

        let winner = match (block_target, entity_target) {
            (Some(block), Some(entity)) => Some(nearer(block, entity)),
            (block, entity) => entity.or(block),
        };
        Ok(match winner {
            Some(target) => {
                if target.has_entity() {
                    self.result = TargetingResult::Entity;
                }
                target
            }
            None => Target::at(self.source),
        })
    }

    /// Marches the aim ray unless blocks are ignored.
    fn march(&mut self, env: &TargetingEnv<'_>, range: f64) -> Result<Option<BlockRef>, OracleError> {
        if self.config.ignore_blocks {
            return Ok(None);
        }
        let marcher = BlockRayMarcher::new(
            self.config.target_min_offset,
            self.config.target_space_required,
            self.config.y_offset,
        );
        let march = marcher.march(env.world()?, env.policy()?, &self.source, range, self.ray);
        self.ray = march.state;
        self.stats.ray_steps = march.steps;
        if march.initialized {
            self.result = march.result;
        }
        Ok(march.block())
    }

    /// The caster's body, provided the entity table still holds it.
    fn live_body(&self, env: &TargetingEnv<'_>) -> Result<Option<EntityHandle>, OracleError> {
        let Some(body) = env.caster().body else {
            return Ok(None);
        };
        Ok(env.entities()?.get(body).map(|snapshot| snapshot.handle))
    }
}
