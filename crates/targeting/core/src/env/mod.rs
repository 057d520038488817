//! Traits describing the world the resolver runs against.
//!
//! Oracles expose voxel geometry, the entity table, cast permissions and a
//! deterministic random source. The [`Env`] aggregate bundles them together
//! with the [`Caster`] so the resolver can reach everything it needs without
//! hard coupling to a concrete host.
mod breakable;
mod entities;
mod error;
mod policy;
mod rng;
mod world;

pub use breakable::{BreakContext, BreakableWorld, EffectSink, UndoRecorder};
pub use entities::EntityOracle;
pub use error::OracleError;
pub use policy::CastPolicy;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use world::WorldOracle;

use crate::entity::Caster;

/// Aggregates the read-only oracles required by the resolver.
pub struct Env<'a, W, E, P, R>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
    P: CastPolicy + ?Sized,
    R: RngOracle + ?Sized,
{
    world: Option<&'a W>,
    entities: Option<&'a E>,
    policy: Option<&'a P>,
    rng: Option<&'a R>,
    caster: Caster,
}

impl<W, E, P, R> Clone for Env<'_, W, E, P, R>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
    P: CastPolicy + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, E, P, R> Copy for Env<'_, W, E, P, R>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
    P: CastPolicy + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type TargetingEnv<'a> =
    Env<'a, dyn WorldOracle + 'a, dyn EntityOracle + 'a, dyn CastPolicy + 'a, dyn RngOracle + 'a>;

impl<'a, W, E, P, R> Env<'a, W, E, P, R>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
    P: CastPolicy + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        world: Option<&'a W>,
        entities: Option<&'a E>,
        policy: Option<&'a P>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            world,
            entities,
            policy,
            rng,
            caster: Caster::default(),
        }
    }

    pub fn with_all(world: &'a W, entities: &'a E, policy: &'a P, rng: &'a R) -> Self {
        Self::new(Some(world), Some(entities), Some(policy), Some(rng))
    }

    pub fn empty() -> Self {
        Self::new(None, None, None, None)
    }

    /// Attaches the casting actor (builder pattern).
    #[must_use]
    pub fn with_caster(mut self, caster: Caster) -> Self {
        self.caster = caster;
        self
    }

    pub fn caster(&self) -> &Caster {
        &self.caster
    }

    /// Returns the WorldOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WorldNotAvailable` if no world oracle was provided.
    pub fn world(&self) -> Result<&'a W, OracleError> {
        self.world.ok_or(OracleError::WorldNotAvailable)
    }

    /// Returns the EntityOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EntitiesNotAvailable` if no entity oracle was provided.
    pub fn entities(&self) -> Result<&'a E, OracleError> {
        self.entities.ok_or(OracleError::EntitiesNotAvailable)
    }

    /// Returns the CastPolicy, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PolicyNotAvailable` if no policy was provided.
    pub fn policy(&self) -> Result<&'a P, OracleError> {
        self.policy.ok_or(OracleError::PolicyNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, W, E, P, R> Env<'a, W, E, P, R>
where
    W: WorldOracle + 'a,
    E: EntityOracle + 'a,
    P: CastPolicy + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `TargetingEnv`.
    pub fn into_targeting_env(self) -> TargetingEnv<'a> {
        let world: Option<&'a dyn WorldOracle> = self.world.map(|world| world as _);
        let entities: Option<&'a dyn EntityOracle> = self.entities.map(|entities| entities as _);
        let policy: Option<&'a dyn CastPolicy> = self.policy.map(|policy| policy as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(world, entities, policy, rng).with_caster(self.caster)
    }
}
