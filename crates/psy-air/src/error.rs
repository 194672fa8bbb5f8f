//! Psychrometric solver errors.

use crate::property::Field;
use psy_core::{CoreError, ErrorKind};
use psy_units::UnitError;
use thiserror::Error;

/// Result type for solver operations.
pub type PsychroResult<T> = Result<T, PsychroError>;

/// Errors that can occur while building or solving an air state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsychroError {
    /// Constructor keywords that are not recognized.
    #[error("Unrecognized params passed in: {}", names.join(","))]
    UnrecognizedParams { names: Vec<String> },

    /// Input that is not a usable number (NaN, infinite).
    #[error("Invalid value for {what}: {value}")]
    InvalidInput { what: &'static str, value: f64 },

    /// Property name that the solver does not know.
    #[error("Unknown property \"{name}\"")]
    UnknownProperty { name: String },

    /// Mathematically undefined input or result.
    #[error("Domain error: {what}")]
    Domain { what: String },

    /// Wet-bulb iteration failed.
    #[error("Wet bulb temperature did not converge after {iterations} iterations: {what}")]
    Convergence { what: String, iterations: usize },

    /// Not enough known fields.
    #[error("{field} is unsolvable from the known values")]
    Unsolvable { field: Field },

    #[error(transparent)]
    Units(#[from] UnitError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PsychroError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedParams { .. } | Self::InvalidInput { .. } => {
                ErrorKind::Configuration
            }
            Self::UnknownProperty { .. } => ErrorKind::Lookup,
            Self::Domain { .. } => ErrorKind::Domain,
            Self::Convergence { .. } => ErrorKind::Convergence,
            Self::Unsolvable { .. } => ErrorKind::Unsolvable,
            Self::Units(e) => e.kind(),
            Self::Core(e) => e.kind(),
        }
    }

    pub(crate) fn domain(what: impl Into<String>) -> Self {
        Self::Domain { what: what.into() }
    }
}
