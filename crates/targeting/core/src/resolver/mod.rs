//! Target resolution.
//!
//! [`TargetResolver`] owns a skill's [`TargetingConfig`]. Each cast calls
//! [`TargetResolver::start`] to open a fresh [`Targeting`] session for one
//! source location and then [`Targeting::target`] to resolve it. Nothing from
//! one session leaks into the next.
//!
//! Branch precedence (see `select.rs`):
//! 1. `NONE`: bare source
//! 2. `SELF`: caster body, else its command block, else bare source
//! 3. every other type marches the aim ray unless `ignore_blocks` is set
//! 4. `BLOCK`/`SELECT`: the ray result, entities never considered
//! 5. `ANY`/`ANY_ENTITY`/`OTHER_ENTITY`: block and entity candidates compete
//!
//! The chosen target is then offset, re-aimed and moved to another world, in
//! that order, when the config asks for it.
mod post;
mod select;

use crate::config::{ParameterMap, TargetingConfig};
use crate::entity::EntityHandle;
use crate::env::{OracleError, TargetingEnv};
use crate::geometry::Location;
use crate::ray::RayState;
use crate::scoring::{EntityScorer, ScoreReport};
use crate::target::{Target, TargetingResult};

/// Counters collected during one resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionStats {
    /// Voxels pulled from the ray step iterator.
    pub ray_steps: u32,
    /// Entities returned by the nearby query.
    pub entities_considered: u32,
    /// Entities that scored above zero.
    pub entities_scored: u32,
}

/// Output of [`Targeting::target`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub target: Target,
    pub result: TargetingResult,
    pub stats: ResolutionStats,
}

/// Targeting policy of one skill.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetResolver {
    config: TargetingConfig,
}

impl TargetResolver {
    pub fn new(config: TargetingConfig) -> Self {
        Self { config }
    }

    pub fn from_parameters(parameters: &ParameterMap) -> Self {
        Self::new(TargetingConfig::from_parameters(parameters))
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    /// Opens a resolution session aimed from `source`.
    pub fn start(&self, source: Location) -> Targeting<'_> {
        Targeting {
            config: &self.config,
            source,
            ray: RayState::default(),
            result: TargetingResult::None,
            candidates: None,
            stats: ResolutionStats::default(),
        }
    }
}

/// Per-resolution scratch state.
#[derive(Debug)]
pub struct Targeting<'r> {
    config: &'r TargetingConfig,
    source: Location,
    ray: RayState,
    result: TargetingResult,
    /// Scored entity list, shared by `target` and `target_entities`.
    candidates: Option<ScoreReport>,
    stats: ResolutionStats,
}

impl Targeting<'_> {
    pub fn source(&self) -> &Location {
        &self.source
    }

    /// Classification of the last resolution.
    pub fn result(&self) -> TargetingResult {
        self.result
    }

    /// Block history left by the last ray march.
    pub fn ray_state(&self) -> &RayState {
        &self.ray
    }

    /// Resolves the target within `range`.
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] if an oracle needed by the configured target
    /// type is missing from `env`. Every geometric outcome, including a miss,
    /// is reported through the returned [`Resolution`].
    pub fn target(&mut self, env: &TargetingEnv<'_>, range: f64) -> Result<Resolution, OracleError> {
        self.ray = RayState::default();
        self.result = TargetingResult::None;
        self.candidates = None;
        self.stats = ResolutionStats::default();

        let target = self.find_target(env, range)?;
        let target = self.post_process(env, target)?;

        if env.caster().debug_level > 0 {
            tracing::debug!(
                target: "targeting",
                kind = %self.config.target_type,
                result = %self.result,
                entity = ?target.entity_handle(),
                block = ?target.block_ref(),
                ray_steps = self.stats.ray_steps,
                "resolved target"
            );
        }

        Ok(Resolution {
            target,
            result: self.result,
            stats: self.stats,
        })
    }

    /// Up to `count` best entity handles within `range`; a negative count
    /// returns every candidate.
    ///
    /// Reuses the candidate list scored by a preceding [`Targeting::target`]
    /// call in this session.
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] when the entity oracle or policy is missing.
    pub fn target_entities(
        &mut self,
        env: &TargetingEnv<'_>,
        range: f64,
        count: i32,
    ) -> Result<Vec<EntityHandle>, OracleError> {
        let report = self.entity_candidates(env, range)?;
        let limit = usize::try_from(count).unwrap_or(usize::MAX);
        Ok(report
            .candidates
            .iter()
            .take(limit)
            .filter_map(Target::entity_handle)
            .collect())
    }

    /// Scores entities once per session.
    fn entity_candidates(
        &mut self,
        env: &TargetingEnv<'_>,
        range: f64,
    ) -> Result<&ScoreReport, OracleError> {
        if self.candidates.is_none() {
            let report = EntityScorer::new(&self.config.weights).score_all(
                env.entities()?,
                env.policy()?,
                env.caster(),
                &self.source,
                range,
            );
            self.stats.entities_considered = report.considered;
            self.stats.entities_scored = report.candidates.len() as u32;
            self.candidates = Some(report);
        }
        Ok(self.candidates.get_or_insert_with(ScoreReport::default))
    }
}
