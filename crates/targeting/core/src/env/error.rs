//! Oracle access errors.

use crate::error::{ErrorSeverity, TargetingError};

/// Errors that occur when a required oracle was not wired into the [`super::Env`].
///
/// These are caller bugs rather than targeting outcomes, so every variant is fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("WorldOracle not available")]
    WorldNotAvailable,

    #[error("EntityOracle not available")]
    EntitiesNotAvailable,

    #[error("CastPolicy not available")]
    PolicyNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl TargetingError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            WorldNotAvailable => "ORACLE_WORLD_NOT_AVAILABLE",
            EntitiesNotAvailable => "ORACLE_ENTITIES_NOT_AVAILABLE",
            PolicyNotAvailable => "ORACLE_POLICY_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
