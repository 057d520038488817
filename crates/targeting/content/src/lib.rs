//! Data-driven skill and scene definitions.
//!
//! This crate describes the data the targeting core is fed with:
//! - Skill definitions: range, destructive charge and the flat targeting
//!   parameter map (TOML)
//! - Scenes: worlds, blocks, entities and the casting actor (RON)
//!
//! Content is turned into oracles by the runtime and never reaches the core
//! directly; the core only sees [`targeting_core::TargetingConfig`] and the
//! oracle traits.

pub mod scene;
pub mod skill;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scene::{BlockKind, BlockSpec, BodySpec, CasterSpec, EntitySpec, Scene, WorldSpec};
pub use skill::{SkillCatalog, SkillDefinition};

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, SceneLoader, SkillLoader};
