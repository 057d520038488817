//! Errors surfaced by the runtime.
use targeting_core::{ErrorSeverity, OracleError, TargetingError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown world '{0}'")]
    UnknownWorld(String),

    #[error("entity table is full ({capacity} slots)")]
    EntitySlotsExhausted { capacity: usize },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl TargetingError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownWorld(_) => ErrorSeverity::Validation,
            Self::EntitySlotsExhausted { .. } => ErrorSeverity::Recoverable,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownWorld(_) => "RUNTIME_UNKNOWN_WORLD",
            Self::EntitySlotsExhausted { .. } => "RUNTIME_ENTITY_SLOTS_EXHAUSTED",
            Self::Oracle(error) => error.error_code(),
        }
    }
}
