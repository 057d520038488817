//! In-memory host for the targeting core.
//!
//! This crate plays the host side of [`targeting_core`]: it stores voxel worlds
//! and entities, answers permission questions, records area-break side effects
//! and drives single casts. Consumers build a [`Sandbox`] from a scene and run
//! skills through a [`CastDriver`].
//!
//! Modules are organized by responsibility:
//! - [`oracle`] implements the core's oracle and collaborator traits
//! - [`sandbox`] owns one scene's oracles and builds `Env` views
//! - [`driver`] runs one cast attempt end to end
//! - [`config`] and [`error`] hold construction settings and failures
pub mod config;
pub mod driver;
pub mod error;
pub mod oracle;
pub mod sandbox;

pub use config::{BlockRegion, CastRules, SandboxConfig};
pub use driver::{CastDriver, CastOutcome};
pub use error::{Result, RuntimeError};
pub use oracle::{BlockData, Body, EffectLog, EntityTable, PlayedEffect, UndoList, VoxelWorlds};
pub use sandbox::{CASTER_NAME, Sandbox};
