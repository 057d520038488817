//! Skill definitions and the catalog they are looked up in.
use std::collections::BTreeMap;

use targeting_core::{ParameterError, ParameterMap, TargetResolver, TargetingConfig};

/// Targeting-relevant part of one skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    /// Catalog key; filled in by the loader.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "SkillDefinition::default_range"))]
    pub range: f64,
    /// Charges fed to the area breaker when the skill hits a block.
    #[cfg_attr(feature = "serde", serde(default))]
    pub break_amount: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: ParameterMap,
}

impl SkillDefinition {
    pub const DEFAULT_RANGE: f64 = 32.0;

    fn default_range() -> f64 {
        Self::DEFAULT_RANGE
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: Self::DEFAULT_RANGE,
            break_amount: None,
            parameters: ParameterMap::new(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: f64) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_break_amount(mut self, amount: f64) -> Self {
        self.break_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: ParameterMap) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.break_amount.is_some_and(|amount| amount > 0.0)
    }

    /// Targeting config, with malformed parameters replaced by defaults.
    pub fn targeting(&self) -> TargetingConfig {
        TargetingConfig::from_parameters(&self.parameters)
    }

    /// Targeting config, rejecting malformed parameters.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found in the parameter map.
    pub fn try_targeting(&self) -> Result<TargetingConfig, ParameterError> {
        TargetingConfig::try_from_parameters(&self.parameters)
    }

    pub fn resolver(&self) -> TargetResolver {
        TargetResolver::new(self.targeting())
    }
}

/// Skills keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillCatalog {
    skills: BTreeMap<String, SkillDefinition>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `skill` under its own name, replacing any previous entry.
    pub fn insert(&mut self, skill: SkillDefinition) {
        self.skills.insert(skill.name.clone(), skill);
    }

    pub fn get(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<SkillDefinition> for SkillCatalog {
    fn from_iter<I: IntoIterator<Item = SkillDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for skill in iter {
            catalog.insert(skill);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use targeting_core::TargetType;

    use super::*;

    #[test]
    fn targeting_reads_the_parameter_map() {
        let skill = SkillDefinition::new("push").with_parameters(
            ParameterMap::new()
                .with("target", "other_entity")
                .with("fov", 0.6),
        );
        let config = skill.targeting();
        assert_eq!(config.target_type, TargetType::OtherEntity);
        assert!(!config.weights.use_hitbox);
        assert_eq!(config.weights.fov, 0.6);
    }

    #[test]
    fn strict_targeting_rejects_bad_values() {
        let skill = SkillDefinition::new("broken")
            .with_parameters(ParameterMap::new().with("fov", "wide"));
        assert!(skill.try_targeting().is_err());
        assert_eq!(skill.targeting().weights.fov, 0.3);
    }

    #[test]
    fn only_positive_charges_are_destructive() {
        assert!(!SkillDefinition::new("look").is_destructive());
        assert!(!SkillDefinition::new("dud").with_break_amount(0.0).is_destructive());
        assert!(SkillDefinition::new("blast").with_break_amount(2.0).is_destructive());
    }

    #[test]
    fn catalog_is_keyed_by_name() {
        let catalog: SkillCatalog = [SkillDefinition::new("b"), SkillDefinition::new("a")]
            .into_iter()
            .collect();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("c").is_none());
    }
}
