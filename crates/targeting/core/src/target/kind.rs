use std::str::FromStr;

/// Targeting policy configured on a skill.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TargetType {
    /// No targeting; the target is the source itself.
    #[default]
    None,
    /// The caster's own body (or its command block).
    #[strum(serialize = "SELF")]
    #[cfg_attr(feature = "serde", serde(rename = "SELF"))]
    SelfOnly,
    /// First acceptable block along the aim ray; entities ignored.
    Block,
    /// Like `Block`, used by selection skills.
    Select,
    /// Closest of block and entity; falls back to the caster body.
    Any,
    /// An entity, falling back to the caster body.
    AnyEntity,
    /// An entity other than the caster, falling back to the bare source.
    OtherEntity,
}

impl TargetType {
    /// Parses a configured name, normalizing anything unknown to [`TargetType::None`].
    pub fn parse_lenient(name: Option<&str>) -> Self {
        name.and_then(|name| Self::from_str(name.trim()).ok())
            .unwrap_or_default()
    }

    /// Whether only the ray result matters.
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Block | Self::Select)
    }
}

/// Classification of the last resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetingResult {
    #[default]
    None,
    Block,
    Entity,
    Miss,
}
