//! Entity candidate scoring.
//!
//! Two mutually exclusive modes, selected by [`ScoringWeights::use_hitbox`]:
//!
//! - **Hitbox**: the aim ray must enter the candidate's padded bounding box
//!   within range. Score is `1 / (1 + t)` for entry distance `t`, so nearer
//!   hits rank first.
//! - **Heuristic**: `distance_score * distance_weight + fov_score * fov_weight
//!   + category_weight`, where `distance_score = 1 - d / max_distance` and
//!   `fov_score = 1 - angle / threshold`. Candidates whose angle exceeds the
//!   threshold score 0. The threshold is `fov`, or `close_fov` when the
//!   candidate is within `close_range`; an angle equal to the threshold passes.
//!
//! Non-positive scores are discarded; survivors are sorted by descending score,
//! ties kept in discovery order.
use glam::DVec3;

use crate::config::{ScoringWeights, TargetingConfig};
use crate::entity::{Caster, EntityCategory, EntitySnapshot};
use crate::env::{CastPolicy, EntityOracle};
use crate::geometry::Location;
use crate::target::Target;

/// Angle in radians between the aim of `source` and the direction to `point`.
///
/// A point at the source itself is treated as dead ahead.
pub fn aim_angle(source: &Location, point: DVec3) -> f64 {
    let to_point = point - source.position;
    let length = to_point.length();
    if length <= f64::EPSILON {
        return 0.0;
    }
    (source.direction().dot(to_point) / length)
        .clamp(-1.0, 1.0)
        .acos()
}

/// Scored candidates plus bookkeeping for diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreReport {
    /// Positive-score candidates, best first.
    pub candidates: Vec<Target>,
    /// Entities returned by the nearby query.
    pub considered: u32,
}

impl ScoreReport {
    pub fn best(&self) -> Option<&Target> {
        self.candidates.first()
    }
}

/// Scores nearby entities for one resolution.
#[derive(Clone, Copy, Debug)]
pub struct EntityScorer<'a> {
    weights: &'a ScoringWeights,
}

impl<'a> EntityScorer<'a> {
    pub fn new(weights: &'a ScoringWeights) -> Self {
        Self { weights }
    }

    /// Radius of the nearby-entity query for a given range.
    pub fn query_radius(&self, range: f64) -> f64 {
        (range + self.weights.hitbox_padding + self.weights.range_query_padding)
            .min(TargetingConfig::MAX_ENTITY_RANGE)
    }

    /// Queries, filters and scores every entity near `source`.
    pub fn score_all<E, P>(
        &self,
        entities: &E,
        policy: &P,
        caster: &Caster,
        source: &Location,
        range: f64,
    ) -> ScoreReport
    where
        E: EntityOracle + ?Sized,
        P: CastPolicy + ?Sized,
    {
        // Loose pre-filter; the resolver applies the real range cut.
        let padded_range_squared = (range + 1.0) * (range + 1.0);
        let radius = self.query_radius(range);
        let max_distance = radius.ceil();

        if caster.debug_level > 8 {
            let block = source.block_pos();
            tracing::debug!(
                target: "targeting",
                x = block.x,
                y = block.y,
                z = block.z,
                radius,
                "targeting entities"
            );
        }

        let nearby = entities.nearby(source, radius);
        let mut report = ScoreReport {
            candidates: Vec::new(),
            considered: nearby.len() as u32,
        };

        for entity in &nearby {
            let is_caster = caster.body == Some(entity.handle);
            if is_caster && !policy.targets_caster() {
                continue;
            }
            let eye = entity.eye_location();
            if eye.world != source.world {
                continue;
            }
            if eye.distance_squared(source) > padded_range_squared {
                continue;
            }
            if !policy.can_target(entity) {
                continue;
            }

            let score = self.score(source, entity, max_distance, is_caster);
            if score > 0.0 {
                if caster.debug_level > 5 {
                    tracing::debug!(
                        target: "targeting",
                        entity = %entity.handle,
                        category = %entity.category,
                        score,
                        "scored candidate"
                    );
                }
                report
                    .candidates
                    .push(Target::entity(source, entity.handle, entity.location, score));
            }
        }

        report
            .candidates
            .sort_by(|a, b| b.score().total_cmp(&a.score()));
        report
    }

    /// Score of a single candidate; 0 means rejected.
    pub fn score(
        &self,
        source: &Location,
        entity: &EntitySnapshot,
        max_distance: f64,
        is_caster: bool,
    ) -> f64 {
        if self.weights.use_hitbox {
            self.hitbox_score(source, entity, max_distance)
        } else {
            self.heuristic_score(source, entity, max_distance, is_caster)
        }
    }

    fn hitbox_score(&self, source: &Location, entity: &EntitySnapshot, max_distance: f64) -> f64 {
        let hitbox = entity.hitbox().inflate(self.weights.hitbox_padding);
        hitbox
            .ray_enter_distance(source.position, source.direction(), max_distance)
            .map_or(0.0, |t| 1.0 / (1.0 + t))
    }

    fn heuristic_score(
        &self,
        source: &Location,
        entity: &EntitySnapshot,
        max_distance: f64,
        is_caster: bool,
    ) -> f64 {
        let weights = self.weights;
        let eye = entity.eye_location().position;
        let distance = source.position.distance(eye);
        if distance > max_distance {
            return 0.0;
        }

        let angle = aim_angle(source, eye);
        let threshold = if weights.close_range > 0.0 && distance <= weights.close_range {
            weights.close_fov
        } else {
            weights.fov
        };
        if angle > threshold {
            return 0.0;
        }

        let distance_score = if max_distance > 0.0 {
            1.0 - distance / max_distance
        } else {
            1.0
        };
        let fov_score = if threshold > 0.0 {
            1.0 - angle / threshold
        } else {
            1.0
        };
        distance_score * weights.distance_weight
            + fov_score * weights.fov_weight
            + self.category_weight(entity.category, is_caster)
    }

    fn category_weight(&self, category: EntityCategory, is_caster: bool) -> f64 {
        let weights = self.weights;
        if is_caster {
            return weights.mage_weight;
        }
        match category {
            EntityCategory::Mage => weights.mage_weight,
            EntityCategory::Player => weights.player_weight,
            EntityCategory::Npc => weights.npc_weight,
            EntityCategory::Living => weights.living_entity_weight,
            EntityCategory::Inanimate => 0.0,
        }
    }
}
