//! Common error infrastructure for targeting-core.
//!
//! Domain errors live next to the code that raises them (`OracleError` in
//! [`crate::env`], `ParameterError` in [`crate::config`]). This module holds the
//! shared classification so callers can pick a recovery strategy without
//! matching on every variant.
//!
//! Geometric outcomes are never errors: a ray that hits nothing, an entity list
//! that filters down to empty, or a degenerate ray all still produce a
//! [`crate::Target`]. Errors are reserved for wiring and configuration mistakes.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: a numeric parameter that does not parse.
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the caller wired the resolver up incorrectly.
    ///
    /// Examples: resolving without an entity oracle.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all targeting-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait TargetingError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
