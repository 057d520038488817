//! In-memory implementations of the targeting oracles.
//!
//! [`VoxelWorlds`] serves both the world oracle and the cast policy,
//! [`EntityTable`] the entity oracle. [`UndoList`] and [`EffectLog`] are the
//! recording collaborators of area breaks. The [`crate::Sandbox`] owns one of
//! each and hands out [`targeting_core::TargetingEnv`] views on demand.
mod entities;
mod journal;
mod world;

pub use entities::{Body, EntityTable};
pub use journal::{EffectLog, PlayedEffect, UndoList};
pub use world::{BlockData, VoxelWorlds};
