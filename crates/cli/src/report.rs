//! Printable views of cast outcomes.
use std::fmt;

use runtime::{CastOutcome, Sandbox};
use serde::Serialize;
use targeting_core::{EntityHandle, Location, WorldOracle};

#[derive(Debug, Serialize)]
pub struct EntityView {
    pub index: u32,
    pub generation: u32,
    pub name: Option<String>,
}

impl EntityView {
    fn new(sandbox: &Sandbox, handle: EntityHandle) -> Self {
        Self {
            index: handle.index,
            generation: handle.generation,
            name: sandbox.entities().name(handle).map(str::to_owned),
        }
    }
}

/// One cast, flattened for output.
#[derive(Debug, Serialize)]
pub struct CastReport {
    pub skill: String,
    pub result: String,
    pub world: Option<String>,
    pub source: [f64; 3],
    pub location: [f64; 3],
    pub block: Option<[i32; 3]>,
    pub entity: Option<EntityView>,
    pub score: f64,
    pub distance: f64,
    pub ray_steps: u32,
    pub entities_considered: u32,
    pub entities_scored: u32,
    pub broken_blocks: u32,
    pub effects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<Vec<EntityView>>,
}

impl CastReport {
    pub fn new(sandbox: &Sandbox, outcome: &CastOutcome) -> Self {
        let target = &outcome.resolution.target;
        let stats = outcome.resolution.stats;
        let location = target.location();
        Self {
            skill: outcome.skill.clone(),
            result: outcome.resolution.result.to_string(),
            world: sandbox.worlds().world_name(location.world).map(str::to_owned),
            source: xyz(&outcome.source),
            location: xyz(location),
            block: target.block_ref().map(|block| block.pos.to_array()),
            entity: target.entity_handle().map(|handle| EntityView::new(sandbox, handle)),
            score: target.score(),
            distance: target.distance_squared().sqrt(),
            ray_steps: stats.ray_steps,
            entities_considered: stats.entities_considered,
            entities_scored: stats.entities_scored,
            broken_blocks: outcome.broken_blocks,
            effects: outcome.effects.played().len(),
            selected: None,
        }
    }

    pub fn with_selected(mut self, sandbox: &Sandbox, handles: &[EntityHandle]) -> Self {
        self.selected = Some(
            handles
                .iter()
                .map(|&handle| EntityView::new(sandbox, handle))
                .collect(),
        );
        self
    }
}

fn xyz(location: &Location) -> [f64; 3] {
    location.position.to_array()
}

impl fmt::Display for EntityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}#{}", self.index),
            None => write!(f, "#{}v{}", self.index, self.generation),
        }
    }
}

impl fmt::Display for CastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.location;
        write!(
            f,
            "{:<12} {:<8} at ({x:.2}, {y:.2}, {z:.2}) in {}",
            self.skill,
            self.result,
            self.world.as_deref().unwrap_or("?")
        )?;
        if let Some([bx, by, bz]) = self.block {
            write!(f, " block=({bx}, {by}, {bz})")?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " entity={entity} score={:.3}", self.score)?;
        }
        write!(f, " dist={:.2} steps={}", self.distance, self.ray_steps)?;
        if self.broken_blocks > 0 {
            write!(f, " broken={}", self.broken_blocks)?;
        }
        if let Some(selected) = &self.selected {
            let names: Vec<String> = selected.iter().map(ToString::to_string).collect();
            write!(f, " selected=[{}]", names.join(", "))?;
        }
        Ok(())
    }
}
