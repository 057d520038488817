use crate::entity::{EntityHandle, EntitySnapshot};
use crate::geometry::Location;

/// Point-in-time access to dynamic objects.
pub trait EntityOracle: Send + Sync {
    /// Entities whose position lies within the axis-aligned cube of half-size
    /// `radius` around `center`, in the host's discovery order.
    ///
    /// Entities in other worlds may be returned; the scorer filters them.
    fn nearby(&self, center: &Location, radius: f64) -> Vec<EntitySnapshot>;

    /// Generation-checked lookup. Returns `None` once the entity is gone.
    fn get(&self, handle: EntityHandle) -> Option<EntitySnapshot>;
}
