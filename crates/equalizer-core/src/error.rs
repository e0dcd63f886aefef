//! Error types for the `equalizer-core` crate.
//!
//! Propagation itself never fails for in-domain numeric input; the only
//! runtime error is a regime name the registry does not know. Registry
//! construction has its own error type since it only happens at startup.

/// Errors surfaced by lookups and propagation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The requested regime is not registered.
    #[error("unknown regime: {0}")]
    UnknownRegime(String),
}

/// Errors that can occur while building a [`RegimeRegistry`].
///
/// [`RegimeRegistry`]: crate::registry::RegimeRegistry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No regimes were supplied.
    #[error("regime registry must contain at least one regime")]
    Empty,

    /// A regime has an empty or whitespace-only name.
    #[error("regime name must not be blank")]
    BlankName,

    /// Two regimes share a name.
    #[error("duplicate regime: {0}")]
    Duplicate(String),

    /// An interaction coefficient is NaN or infinite.
    #[error("regime {0} has a non-finite interaction coefficient")]
    NonFiniteCoefficient(String),

    /// The regime weight is NaN, infinite, or negative.
    #[error("regime {0} has an invalid weight (must be finite and >= 0)")]
    InvalidWeight(String),
}

/// Errors that can occur while validating [`EngineTuning`].
///
/// [`EngineTuning`]: crate::propagation::EngineTuning
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    /// The impact exponent is not a finite positive number.
    #[error("gamma must be finite and > 0, got {0}")]
    InvalidGamma(f64),

    /// Integrity breakpoints are not strictly increasing finite numbers.
    #[error("condition breakpoints must be finite and strictly increasing")]
    UnorderedBreakpoints,

    /// A condition multiplier is NaN or infinite.
    #[error("condition multipliers must be finite")]
    NonFiniteMultiplier,

    /// The result bound is not a finite positive number.
    #[error("value bound must be finite and > 0, got {0}")]
    InvalidBound(f64),
}
