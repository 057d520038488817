//! Aim resolution rules for a voxel world with moving entities.
//!
//! `targeting-core` answers "what is this cast aimed at?": the first acceptable
//! block along the aim ray, the best scoring nearby entity, or nothing. It also
//! carries the budgeted flood destruction used by area effects. The crate does
//! no I/O; hosts plug in their world, entity table and permission checks through
//! the oracle traits re-exported from [`env`].
pub mod breaker;
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod geometry;
pub mod ray;
pub mod resolver;
pub mod scoring;
pub mod standing;
pub mod target;

pub use breaker::{AreaBreaker, BREAK_EFFECT};
pub use config::{ParameterError, ParameterMap, ParameterValue, ScoringWeights, TargetingConfig};
pub use entity::{Caster, EntityCategory, EntityHandle, EntitySnapshot};
pub use env::{
    BreakContext, BreakableWorld, CastPolicy, EffectSink, EntityOracle, Env, OracleError, PcgRng,
    RngOracle, TargetingEnv, UndoRecorder, WorldOracle, compute_seed,
};
pub use error::{ErrorSeverity, TargetingError};
pub use geometry::{Aabb, BlockFace, BlockPos, BlockRef, Location, WorldId};
pub use ray::{BlockRayMarcher, BlockSteps, RayError, RayMarch, RayState};
pub use resolver::{Resolution, ResolutionStats, TargetResolver, Targeting};
pub use scoring::{EntityScorer, ScoreReport};
pub use standing::{DEFAULT_STAND_RANGE, find_place_to_stand, try_find_place_to_stand};
pub use target::{Target, TargetType, TargetingResult};
