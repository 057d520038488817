//! Owns the in-memory oracles of one scene.
use glam::{DVec3, IVec3};
use targeting_content::Scene;
use targeting_core::{
    AreaBreaker, BlockRef, BreakContext, Caster, EntityOracle, Env, Location, PcgRng,
    TargetingEnv, WorldId, WorldOracle,
};

use crate::config::SandboxConfig;
use crate::error::{Result, RuntimeError};
use crate::oracle::{BlockData, Body, EffectLog, EntityTable, UndoList, VoxelWorlds};

/// Name given to the caster's body when spawned from a scene.
pub const CASTER_NAME: &str = "caster";

/// Scene state plus the casting actor.
#[derive(Clone, Debug)]
pub struct Sandbox {
    worlds: VoxelWorlds,
    entities: EntityTable,
    rng: PcgRng,
    caster: Caster,
    /// Where a bodiless caster looks from.
    eye: Location,
    seed: u64,
}

impl Sandbox {
    /// Empty sandbox with no worlds; the caster looks from the origin of world 0.
    pub fn new(config: &SandboxConfig) -> Self {
        Self {
            worlds: VoxelWorlds::new(config.rules.clone()),
            entities: EntityTable::new(config.entity_capacity),
            rng: PcgRng,
            caster: Caster::default(),
            eye: Location::new(WorldId(0), DVec3::ZERO),
            seed: config.seed,
        }
    }

    /// Builds the worlds, blocks, entities and caster described by `scene`.
    pub fn from_scene(scene: &Scene, config: &SandboxConfig) -> Result<Self> {
        let mut sandbox = Self::new(config);
        for world in &scene.worlds {
            sandbox.worlds.add_world(world.name.clone(), world.max_height);
        }

        for block in &scene.blocks {
            let world = sandbox.world_id(&block.world)?;
            sandbox.worlds.set(
                BlockRef::new(world, IVec3::from_array(block.pos)),
                BlockData {
                    kind: block.kind,
                    resistance: block.resistance,
                    reflective: block.reflective,
                },
            );
        }

        for entity in &scene.entities {
            let world = sandbox.world_id(&entity.world)?;
            let location = Location::new(world, DVec3::from_array(entity.position))
                .with_rotation(entity.yaw, entity.pitch);
            sandbox
                .entities
                .spawn(entity.name.clone(), location, body(&entity.body))?;
        }

        let spec = &scene.caster;
        let world = sandbox.world_id(&spec.world)?;
        let eye = Location::new(world, DVec3::from_array(spec.position)).with_rotation(spec.yaw, spec.pitch);
        let mut caster = Caster {
            body: None,
            command_block: spec
                .command_block
                .map(|pos| BlockRef::new(world, IVec3::from_array(pos))),
            debug_level: spec.debug_level,
        };
        if let Some(spec_body) = &spec.body {
            let feet = eye.offset(DVec3::new(0.0, -spec_body.eye_height, 0.0));
            let handle = sandbox
                .entities
                .spawn(Some(CASTER_NAME.to_owned()), feet, body(spec_body))?;
            caster.body = Some(handle);
        }
        sandbox.set_caster(caster, eye);

        tracing::debug!(
            worlds = scene.worlds.len(),
            blocks = scene.blocks.len(),
            entities = sandbox.entities.len(),
            "sandbox built from scene"
        );
        Ok(sandbox)
    }

    /// Read-only oracle view for one resolution.
    pub fn env(&self) -> TargetingEnv<'_> {
        Env::with_all(&self.worlds, &self.entities, &self.worlds, &self.rng)
            .with_caster(self.caster)
            .into_targeting_env()
    }

    /// Where casts aim from: the live body's eye, else the configured eye.
    pub fn source(&self) -> Location {
        self.caster
            .body
            .and_then(|body| self.entities.get(body))
            .map_or(self.eye, |body| body.eye_location())
    }

    pub fn caster(&self) -> &Caster {
        &self.caster
    }

    pub fn set_caster(&mut self, caster: Caster, eye: Location) {
        self.caster = caster;
        self.eye = eye;
    }

    pub fn world_id(&self, name: &str) -> Result<WorldId> {
        self.worlds
            .world_named(name)
            .ok_or_else(|| RuntimeError::UnknownWorld(name.to_owned()))
    }

    pub fn worlds(&self) -> &VoxelWorlds {
        &self.worlds
    }

    pub fn worlds_mut(&mut self) -> &mut VoxelWorlds {
        &mut self.worlds
    }

    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityTable {
        &mut self.entities
    }

    pub fn rng(&self) -> &PcgRng {
        &self.rng
    }

    /// Base seed casts derive their own seeds from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs an area break from the caster's point of view.
    pub fn break_block(
        &mut self,
        block: BlockRef,
        amount: f64,
        seed: u64,
        undo: &mut UndoList,
        effects: &mut EffectLog,
    ) -> u32 {
        let origin = self.source();
        let mut ctx = BreakContext::new(&mut self.worlds, &self.rng, seed, origin)
            .with_undo(undo)
            .with_effects(effects);
        AreaBreaker::new().break_block(&mut ctx, block, amount)
    }
}

fn body(spec: &targeting_content::BodySpec) -> Body {
    Body {
        category: spec.category,
        eye_height: spec.eye_height,
        half_width: spec.half_width,
        height: spec.height,
    }
}
