//! Skill catalog loader.
//!
//! ```toml
//! [skills.blink]
//! range = 24
//!
//! [skills.blink.parameters]
//! target = "block"
//! target_space_required = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::skill::{SkillCatalog, SkillDefinition};

#[derive(Debug, Deserialize)]
struct SkillsToml {
    #[serde(default)]
    skills: BTreeMap<String, SkillDefinition>,
}

/// Loader for skill catalogs from TOML files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a TOML file.
    ///
    /// Parameters are checked strictly: a malformed value fails the load and
    /// names the skill it belongs to.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load skills from {}: {}", path.display(), e))
    }

    /// Parse a skill catalog from TOML text.
    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let data: SkillsToml = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skills TOML: {}", e))?;

        let mut catalog = SkillCatalog::new();
        for (name, mut skill) in data.skills {
            anyhow::ensure!(
                skill.range.is_finite() && skill.range >= 0.0,
                "skill '{}': range must be a non-negative number, got {}",
                name,
                skill.range
            );
            if let Some(amount) = skill.break_amount {
                anyhow::ensure!(
                    amount.is_finite(),
                    "skill '{}': break_amount must be finite",
                    name
                );
            }
            skill
                .try_targeting()
                .map_err(|e| anyhow::anyhow!("skill '{}': {}", name, e))?;

            skill.name = name;
            catalog.insert(skill);
        }
        Ok(catalog)
    }
}
