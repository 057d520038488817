//! Scene description: worlds, blocks, entities and the casting actor.
//!
//! Positions are plain arrays so scene files stay readable; the runtime turns
//! them into core geometry when it builds its oracles.
use targeting_core::EntityCategory;

/// One voxel world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "WorldSpec::default_max_height"))]
    pub max_height: i32,
}

impl WorldSpec {
    pub const DEFAULT_MAX_HEIGHT: i32 = 255;

    fn default_max_height() -> i32 {
        Self::DEFAULT_MAX_HEIGHT
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_height: Self::DEFAULT_MAX_HEIGHT,
        }
    }
}

/// Material class of a non-empty block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    /// Stops rays, carries actors.
    #[default]
    Solid,
    /// Water and the like: rays and actors pass through.
    Liquid,
    /// Flowers, grass: rays and actors pass through.
    Plant,
    /// Glass-like: stops stand-mode rays but is never a target.
    Barrier,
}

/// A placed block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockSpec {
    pub world: String,
    pub pos: [i32; 3],
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: BlockKind,
    /// Breakable resistance; `None` means indestructible.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistance: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reflective: bool,
}

/// Body dimensions shared by entities and the caster.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodySpec {
    pub category: EntityCategory,
    #[cfg_attr(feature = "serde", serde(default = "BodySpec::default_eye_height"))]
    pub eye_height: f64,
    #[cfg_attr(feature = "serde", serde(default = "BodySpec::default_half_width"))]
    pub half_width: f64,
    #[cfg_attr(feature = "serde", serde(default = "BodySpec::default_height"))]
    pub height: f64,
}

impl BodySpec {
    fn default_eye_height() -> f64 {
        1.62
    }

    fn default_half_width() -> f64 {
        0.3
    }

    fn default_height() -> f64 {
        1.8
    }

    /// Humanoid proportions.
    pub fn humanoid(category: EntityCategory) -> Self {
        Self {
            category,
            eye_height: Self::default_eye_height(),
            half_width: Self::default_half_width(),
            height: Self::default_height(),
        }
    }
}

/// An entity standing somewhere in the scene.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    pub world: String,
    /// Feet position.
    pub position: [f64; 3],
    #[cfg_attr(feature = "serde", serde(default))]
    pub yaw: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pitch: f64,
    pub body: BodySpec,
}

/// The casting actor.
///
/// `position` is the eye; a caster with a `body` gets an entity whose feet sit
/// `eye_height` below it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CasterSpec {
    pub world: String,
    pub position: [f64; 3],
    #[cfg_attr(feature = "serde", serde(default))]
    pub yaw: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pitch: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub body: Option<BodySpec>,
    /// Bound command block, for block proxies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub command_block: Option<[i32; 3]>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub debug_level: u8,
}

/// A complete scene.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub worlds: Vec<WorldSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks: Vec<BlockSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entities: Vec<EntitySpec>,
    pub caster: CasterSpec,
}
