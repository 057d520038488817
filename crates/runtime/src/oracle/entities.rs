//! Generational entity table served through [`targeting_core::EntityOracle`].
use targeting_core::{EntityCategory, EntityHandle, EntityOracle, EntitySnapshot, Location};

use crate::error::{Result, RuntimeError};

/// Body proportions of a spawned entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub category: EntityCategory,
    pub eye_height: f64,
    pub half_width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    name: Option<String>,
    entity: Option<EntitySnapshot>,
}

/// Fixed-capacity table of live entities.
///
/// Freed slots are reused with a bumped generation, so handles to despawned
/// entities stop resolving instead of aliasing the newcomer.
#[derive(Clone, Debug)]
pub struct EntityTable {
    slots: Vec<Slot>,
    capacity: usize,
}

impl EntityTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
        }
    }

    /// Spawns an entity standing at `location` (feet).
    pub fn spawn(&mut self, name: Option<String>, location: Location, body: Body) -> Result<EntityHandle> {
        let index = match self.slots.iter().position(|slot| slot.entity.is_none()) {
            Some(index) => index,
            None if self.slots.len() < self.capacity => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
            None => {
                return Err(RuntimeError::EntitySlotsExhausted {
                    capacity: self.capacity,
                });
            }
        };

        let slot = &mut self.slots[index];
        let handle = EntityHandle::new(index as u32, slot.generation);
        slot.name = name;
        slot.entity = Some(EntitySnapshot {
            handle,
            category: body.category,
            location,
            eye_height: body.eye_height,
            half_width: body.half_width,
            height: body.height,
        });
        Ok(handle)
    }

    /// Removes the entity; returns false for stale or unknown handles.
    pub fn despawn(&mut self, handle: EntityHandle) -> bool {
        match self.live_slot_mut(handle) {
            Some(slot) => {
                slot.entity = None;
                slot.name = None;
                slot.generation = slot.generation.wrapping_add(1);
                true
            }
            None => false,
        }
    }

    /// Moves a live entity; returns false for stale or unknown handles.
    pub fn move_to(&mut self, handle: EntityHandle, location: Location) -> bool {
        match self.live_slot_mut(handle).and_then(|slot| slot.entity.as_mut()) {
            Some(entity) => {
                entity.location = location;
                true
            }
            None => false,
        }
    }

    pub fn name(&self, handle: EntityHandle) -> Option<&str> {
        self.live_slot(handle).and_then(|slot| slot.name.as_deref())
    }

    /// Handle of the first live entity called `name`.
    pub fn find(&self, name: &str) -> Option<EntityHandle> {
        self.slots
            .iter()
            .filter(|slot| slot.name.as_deref() == Some(name))
            .find_map(|slot| slot.entity.map(|entity| entity.handle))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.entity.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live_slot(&self, handle: EntityHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.entity.is_some())
    }

    fn live_slot_mut(&mut self, handle: EntityHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.entity.is_some())
    }
}

impl EntityOracle for EntityTable {
    fn nearby(&self, center: &Location, radius: f64) -> Vec<EntitySnapshot> {
        self.slots
            .iter()
            .filter_map(|slot| slot.entity)
            .filter(|entity| {
                let delta = (entity.location.position - center.position).abs();
                entity.location.world == center.world && delta.max_element() <= radius
            })
            .collect()
    }

    fn get(&self, handle: EntityHandle) -> Option<EntitySnapshot> {
        self.live_slot(handle).and_then(|slot| slot.entity)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;
    use targeting_core::WorldId;

    use super::*;

    fn zombie() -> Body {
        Body {
            category: EntityCategory::Npc,
            eye_height: 1.7,
            half_width: 0.3,
            height: 1.9,
        }
    }

    fn at(x: f64, z: f64) -> Location {
        Location::new(WorldId(0), DVec3::new(x, 64.0, z))
    }

    #[test]
    fn stale_handles_stop_resolving() {
        let mut table = EntityTable::new(4);
        let first = table.spawn(None, at(0.0, 0.0), zombie()).expect("slot");
        assert!(table.despawn(first));
        assert!(table.get(first).is_none());

        let second = table.spawn(None, at(1.0, 0.0), zombie()).expect("slot");
        assert_eq!(second.index, first.index);
        assert_ne!(second.generation, first.generation);
        assert!(table.get(first).is_none());
        assert!(!table.despawn(first));
        assert!(!table.move_to(first, at(5.0, 5.0)));
        assert_eq!(table.get(second).map(|e| e.location), Some(at(1.0, 0.0)));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut table = EntityTable::new(1);
        table.spawn(None, at(0.0, 0.0), zombie()).expect("slot");
        assert!(matches!(
            table.spawn(None, at(0.0, 0.0), zombie()),
            Err(RuntimeError::EntitySlotsExhausted { capacity: 1 })
        ));
    }

    #[test]
    fn nearby_uses_a_cube_in_discovery_order() {
        let mut table = EntityTable::new(8);
        let a = table.spawn(None, at(3.0, 3.0), zombie()).expect("slot");
        let _far = table.spawn(None, at(9.0, 0.0), zombie()).expect("slot");
        let b = table.spawn(None, at(-2.0, 0.5), zombie()).expect("slot");
        let elsewhere = Location::new(WorldId(1), DVec3::new(0.0, 64.0, 0.0));
        table
            .spawn(None, elsewhere, zombie())
            .expect("slot");

        let found: Vec<_> = table
            .nearby(&at(0.0, 0.0), 3.0)
            .into_iter()
            .map(|entity| entity.handle)
            .collect();
        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn names_resolve_to_live_entities() {
        let mut table = EntityTable::new(4);
        let bob = table
            .spawn(Some("bob".into()), at(0.0, 0.0), zombie())
            .expect("slot");
        assert_eq!(table.find("bob"), Some(bob));
        assert_eq!(table.name(bob), Some("bob"));
        table.despawn(bob);
        assert_eq!(table.find("bob"), None);
        assert!(table.is_empty());
    }
}
