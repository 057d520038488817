use crate::entity::EntitySnapshot;
use crate::geometry::{BlockRef, Location};

/// Permission checks and block predicates supplied by the casting host.
///
/// The resolver only asks; it never decides build or PvP rules itself.
pub trait CastPolicy: Send + Sync {
    /// Whether the caster may cast at `location` at all.
    fn can_cast(&self, _location: &Location) -> bool {
        true
    }

    /// Whether `entity` may be picked as a target.
    fn can_target(&self, _entity: &EntitySnapshot) -> bool {
        true
    }

    /// Whether the caster's own body is a valid candidate.
    fn targets_caster(&self) -> bool {
        false
    }

    /// Whether the ray may stop at `block`.
    fn is_targetable(&self, block: BlockRef) -> bool;

    /// Whether a stand-mode ray may continue through `block`.
    fn allow_pass_through(&self, block: BlockRef) -> bool;

    /// Whether an actor fits inside `block` (air, water, flowers...).
    fn is_ok_to_stand_in(&self, block: BlockRef) -> bool;

    /// Whether `block` can carry an actor standing on top of it.
    fn is_ok_to_stand_on(&self, block: BlockRef) -> bool;
}
