//! Skill targeting configuration and the flat parameter map it is read from.
//!
//! Every key is optional. [`TargetingConfig::from_parameters`] never fails:
//! malformed values are logged and replaced by their defaults. Loaders that
//! want to reject bad data up front use [`TargetingConfig::try_from_parameters`].
//! The target type is lenient in both paths; unknown names become
//! [`TargetType::None`].
use std::collections::BTreeMap;

use glam::DVec3;

use crate::error::{ErrorSeverity, TargetingError};
use crate::target::TargetType;

/// A single configured value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParameterValue {
    fn describe(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Errors raised by strict parameter parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterError {
    #[error("parameter '{key}' expects a number, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("parameter '{key}' expects an integer, got '{value}'")]
    InvalidInteger { key: String, value: String },

    #[error("parameter '{key}' expects true or false, got '{value}'")]
    InvalidBool { key: String, value: String },
}

impl TargetingError for ParameterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "PARAMETER_INVALID_NUMBER",
            Self::InvalidInteger { .. } => "PARAMETER_INVALID_INTEGER",
            Self::InvalidBool { .. } => "PARAMETER_INVALID_BOOL",
        }
    }
}

/// Flat key/value parameter set of one skill.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParameterMap(BTreeMap<String, ParameterValue>);

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value (builder pattern).
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ParameterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParameterValue>) {
        self.0.insert(key.to_owned(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.0.get(key)
    }

    /// Text form of a value; non-text values are rendered.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).map(ParameterValue::describe)
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, ParameterError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match value {
            ParameterValue::Int(value) => Ok(Some(*value as f64)),
            ParameterValue::Float(value) => Ok(Some(*value)),
            ParameterValue::Text(text) => text.trim().parse().map(Some).map_err(|_| {
                ParameterError::InvalidNumber {
                    key: key.to_owned(),
                    value: text.clone(),
                }
            }),
            ParameterValue::Bool(_) => Err(ParameterError::InvalidNumber {
                key: key.to_owned(),
                value: value.describe(),
            }),
        }
    }

    /// Integer value; floats are truncated toward zero.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, ParameterError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match value {
            ParameterValue::Int(value) => Ok(Some(*value)),
            ParameterValue::Float(value) => Ok(Some(value.trunc() as i64)),
            ParameterValue::Text(text) => text.trim().parse().map(Some).map_err(|_| {
                ParameterError::InvalidInteger {
                    key: key.to_owned(),
                    value: text.clone(),
                }
            }),
            ParameterValue::Bool(_) => Err(ParameterError::InvalidInteger {
                key: key.to_owned(),
                value: value.describe(),
            }),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ParameterError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match value {
            ParameterValue::Bool(value) => Ok(Some(*value)),
            ParameterValue::Text(text) if text.eq_ignore_ascii_case("true") => Ok(Some(true)),
            ParameterValue::Text(text) if text.eq_ignore_ascii_case("false") => Ok(Some(false)),
            other => Err(ParameterError::InvalidBool {
                key: key.to_owned(),
                value: other.describe(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<ParameterValue>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Weights and thresholds used by the entity scorer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringWeights {
    pub distance_weight: f64,
    pub fov_weight: f64,
    pub npc_weight: f64,
    pub mage_weight: f64,
    pub player_weight: f64,
    pub living_entity_weight: f64,
    /// Maximum angle (radians) between the aim and a candidate.
    pub fov: f64,
    /// Candidates this close use `close_fov` instead of `fov`.
    pub close_range: f64,
    pub close_fov: f64,
    pub hitbox_padding: f64,
    pub range_query_padding: f64,
    /// Hitbox intersection instead of the weighted heuristic.
    pub use_hitbox: bool,
}

impl ScoringWeights {
    pub const DEFAULT_DISTANCE_WEIGHT: f64 = 1.0;
    pub const DEFAULT_FOV_WEIGHT: f64 = 4.0;
    pub const DEFAULT_NPC_WEIGHT: f64 = -1.0;
    pub const DEFAULT_MAGE_WEIGHT: f64 = 5.0;
    pub const DEFAULT_PLAYER_WEIGHT: f64 = 4.0;
    pub const DEFAULT_LIVING_ENTITY_WEIGHT: f64 = 3.0;
    pub const DEFAULT_FOV: f64 = 0.3;
    pub const DEFAULT_CLOSE_RANGE: f64 = 1.0;
    pub const DEFAULT_CLOSE_FOV: f64 = 0.5;
    pub const DEFAULT_RANGE_QUERY_PADDING: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            distance_weight: Self::DEFAULT_DISTANCE_WEIGHT,
            fov_weight: Self::DEFAULT_FOV_WEIGHT,
            npc_weight: Self::DEFAULT_NPC_WEIGHT,
            mage_weight: Self::DEFAULT_MAGE_WEIGHT,
            player_weight: Self::DEFAULT_PLAYER_WEIGHT,
            living_entity_weight: Self::DEFAULT_LIVING_ENTITY_WEIGHT,
            fov: Self::DEFAULT_FOV,
            close_range: Self::DEFAULT_CLOSE_RANGE,
            close_fov: Self::DEFAULT_CLOSE_FOV,
            hitbox_padding: 0.0,
            range_query_padding: Self::DEFAULT_RANGE_QUERY_PADDING,
            use_hitbox: true,
        }
    }

    /// Heuristic scoring with the default weights.
    pub fn heuristic() -> Self {
        Self {
            use_hitbox: false,
            ..Self::new()
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a skill configures about targeting.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingConfig {
    pub target_type: TargetType,
    pub weights: ScoringWeights,
    /// Skip the ray marcher entirely.
    pub ignore_blocks: bool,
    /// Number of blocks along the ray to skip before accepting one.
    pub target_min_offset: u32,
    /// Stop where an actor could stand instead of at the first solid block.
    pub target_space_required: bool,
    /// Added to the ray origin height.
    pub y_offset: f64,
    pub location_offset: Option<DVec3>,
    pub direction_override: Option<DVec3>,
    /// World name; `~suffix` appends to the current world's name.
    pub world_override: Option<String>,
}

impl TargetingConfig {
    /// Hard cap on the radius of nearby-entity queries.
    pub const MAX_ENTITY_RANGE: f64 = 64.0;

    pub fn new(target_type: TargetType) -> Self {
        Self {
            target_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Reads a config, replacing malformed values by their defaults.
    pub fn from_parameters(parameters: &ParameterMap) -> Self {
        let reader = Reader {
            parameters,
            strict: false,
        };
        match Self::read(&reader) {
            Ok(config) => config,
            // Lenient readers never surface errors.
            Err(_) => Self::default(),
        }
    }

    /// Reads a config, rejecting the first malformed value.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] naming the offending key.
    pub fn try_from_parameters(parameters: &ParameterMap) -> Result<Self, ParameterError> {
        Self::read(&Reader {
            parameters,
            strict: true,
        })
    }

    fn read(reader: &Reader<'_>) -> Result<Self, ParameterError> {
        let parameters = reader.parameters;
        let target_type = TargetType::parse_lenient(parameters.get_str("target").as_deref());

        let weights = ScoringWeights {
            use_hitbox: reader.bool("hitbox", !parameters.contains("fov"))?,
            hitbox_padding: reader.f64("hitbox_size", 0.0)?,
            range_query_padding: reader.f64(
                "range_padding",
                ScoringWeights::DEFAULT_RANGE_QUERY_PADDING,
            )?,
            fov: reader.f64("fov", ScoringWeights::DEFAULT_FOV)?,
            close_range: reader.f64("close_range", ScoringWeights::DEFAULT_CLOSE_RANGE)?,
            close_fov: reader.f64("close_fov", ScoringWeights::DEFAULT_CLOSE_FOV)?,
            distance_weight: reader.f64("distance_weight", ScoringWeights::DEFAULT_DISTANCE_WEIGHT)?,
            fov_weight: reader.f64("fov_weight", ScoringWeights::DEFAULT_FOV_WEIGHT)?,
            npc_weight: reader.i64("npc_weight", -1)? as f64,
            mage_weight: reader.i64("mage_weight", 5)? as f64,
            player_weight: reader.i64("player_weight", 4)? as f64,
            living_entity_weight: reader.i64("entity_weight", 3)? as f64,
        };

        let min_offset = reader.i64("target_min_offset", 0)?;
        let min_offset = reader.i64("tmo", min_offset)?;

        Ok(Self {
            target_type,
            weights,
            ignore_blocks: reader.bool("ignore_blocks", false)?,
            target_min_offset: min_offset.clamp(0, i64::from(u32::MAX)) as u32,
            target_space_required: reader.bool("target_space_required", false)?,
            y_offset: reader.f64("y_offset", 0.0)?,
            location_offset: reader.vector(["otx", "oty", "otz"])?,
            direction_override: reader.vector(["otdx", "otdy", "otdz"])?,
            world_override: parameters
                .get_str("otworld")
                .filter(|name| !name.is_empty()),
        })
    }
}

struct Reader<'a> {
    parameters: &'a ParameterMap,
    strict: bool,
}

impl Reader<'_> {
    fn settle<T>(&self, key: &str, value: Result<Option<T>, ParameterError>) -> Result<Option<T>, ParameterError> {
        match value {
            Ok(value) => Ok(value),
            Err(error) if self.strict => Err(error),
            Err(error) => {
                tracing::warn!(target: "targeting", key, %error, "ignoring malformed parameter");
                Ok(None)
            }
        }
    }

    fn opt_f64(&self, key: &str) -> Result<Option<f64>, ParameterError> {
        self.settle(key, self.parameters.get_f64(key))
    }

    fn f64(&self, key: &str, default: f64) -> Result<f64, ParameterError> {
        Ok(self.opt_f64(key)?.unwrap_or(default))
    }

    fn i64(&self, key: &str, default: i64) -> Result<i64, ParameterError> {
        Ok(self
            .settle(key, self.parameters.get_i64(key))?
            .unwrap_or(default))
    }

    fn bool(&self, key: &str, default: bool) -> Result<bool, ParameterError> {
        Ok(self
            .settle(key, self.parameters.get_bool(key))?
            .unwrap_or(default))
    }

    /// Vector from three optional components; `None` unless at least one is set.
    fn vector(&self, keys: [&str; 3]) -> Result<Option<DVec3>, ParameterError> {
        let [x, y, z] = [
            self.opt_f64(keys[0])?,
            self.opt_f64(keys[1])?,
            self.opt_f64(keys[2])?,
        ];
        if x.is_none() && y.is_none() && z.is_none() {
            return Ok(None);
        }
        Ok(Some(DVec3::new(
            x.unwrap_or(0.0),
            y.unwrap_or(0.0),
            z.unwrap_or(0.0),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_parameters_use_defaults() {
        let config = TargetingConfig::from_parameters(&ParameterMap::new());
        assert_eq!(config.target_type, TargetType::None);
        assert!(config.weights.use_hitbox);
        assert_eq!(config.weights.fov, 0.3);
        assert_eq!(config.weights.close_range, 1.0);
        assert_eq!(config.weights.close_fov, 0.5);
        assert_eq!(config.weights.npc_weight, -1.0);
        assert_eq!(config.weights.living_entity_weight, 3.0);
        assert!(config.location_offset.is_none());
        assert!(config.world_override.is_none());
    }

    #[test]
    fn fov_key_switches_to_heuristic_scoring() {
        let params = ParameterMap::new().with("fov", 0.6);
        let config = TargetingConfig::from_parameters(&params);
        assert!(!config.weights.use_hitbox);
        assert_eq!(config.weights.fov, 0.6);

        let params = params.with("hitbox", true);
        assert!(TargetingConfig::from_parameters(&params).weights.use_hitbox);
    }

    #[test]
    fn tmo_overrides_target_min_offset() {
        let params = ParameterMap::new()
            .with("target_min_offset", 2_i64)
            .with("tmo", 5_i64);
        assert_eq!(TargetingConfig::from_parameters(&params).target_min_offset, 5);
    }

    #[test]
    fn partial_offset_fills_missing_axes_with_zero() {
        let params = ParameterMap::new().with("oty", 2.5).with("otdx", 1_i64);
        let config = TargetingConfig::from_parameters(&params);
        assert_eq!(config.location_offset, Some(DVec3::new(0.0, 2.5, 0.0)));
        assert_eq!(config.direction_override, Some(DVec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn lenient_reader_replaces_malformed_values() {
        let params = ParameterMap::new()
            .with("target", "any")
            .with("fov_weight", "lots")
            .with("ignore_blocks", "sometimes");
        let config = TargetingConfig::from_parameters(&params);
        assert_eq!(config.target_type, TargetType::Any);
        assert_eq!(config.weights.fov_weight, 4.0);
        assert!(!config.ignore_blocks);
    }

    #[test]
    fn strict_reader_names_the_bad_key() {
        let params = ParameterMap::new().with("fov_weight", "lots");
        let error = TargetingConfig::try_from_parameters(&params).unwrap_err();
        assert_eq!(
            error,
            ParameterError::InvalidNumber {
                key: "fov_weight".into(),
                value: "lots".into()
            }
        );
        assert_eq!(error.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn strict_reader_still_normalizes_target_type() {
        let params = ParameterMap::new().with("target", "diagonal");
        let config = TargetingConfig::try_from_parameters(&params).unwrap();
        assert_eq!(config.target_type, TargetType::None);
    }

    #[test]
    fn numeric_text_is_accepted() {
        let params = ParameterMap::new().with("range_padding", " 2.5 ").with("npc_weight", "-3");
        let config = TargetingConfig::try_from_parameters(&params).unwrap();
        assert_eq!(config.weights.range_query_padding, 2.5);
        assert_eq!(config.weights.npc_weight, -3.0);
    }
}
