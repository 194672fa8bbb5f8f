use std::fmt;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NonFinite { .. } => ErrorKind::Domain,
        }
    }
}

/// Failure taxonomy shared by every crate in the workspace.
///
/// Concrete error enums stay crate-local; `kind()` on each of them maps
/// onto one of these so callers can branch without matching variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad constructor keyword, bad unit or dimension registration.
    Configuration,
    /// Unknown unit, dimension, system or property name.
    Lookup,
    /// Cross-dimension conversion.
    DimensionMismatch,
    /// Mathematically undefined input (log of non-positive, zero denominator).
    Domain,
    /// Iteration cap reached without meeting tolerance.
    Convergence,
    /// Not enough known fields to derive the requested one.
    Unsolvable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Configuration => "configuration",
            Self::Lookup => "lookup",
            Self::DimensionMismatch => "dimension mismatch",
            Self::Domain => "domain",
            Self::Convergence => "convergence",
            Self::Unsolvable => "unsolvable",
        };
        write!(f, "{s}")
    }
}
