//! Unit registry errors.

use crate::{Dimension, SystemKind};
use psy_core::ErrorKind;
use thiserror::Error;

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

/// Errors raised while registering units or converting values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Bad registration (missing dimension, conflicting redefinition, bad factor).
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    /// Unit name not registered.
    #[error("Unit \"{name}\" does not exist")]
    UnknownUnit { name: String },

    /// Unit name not registered in the given system.
    #[error("Unit \"{name}\" is not part of the {system} system")]
    NotInSystem { name: String, system: SystemKind },

    /// No unit declared for a dimension in a system.
    #[error("No unit has been declared for the \"{dimension}\" dimension in the {system} system")]
    NoMainUnit {
        system: SystemKind,
        dimension: Dimension,
    },

    /// Unrecognized measurement system name.
    #[error("Name \"{name}\" is not a known measurement system")]
    UnknownSystem { name: String },

    /// Unrecognized dimension name.
    #[error("Name \"{name}\" is not a known dimension")]
    UnknownDimension { name: String },

    /// Conversion between units of different dimensions.
    #[error("Cannot convert {from} ({from_dim}) to {to} ({to_dim})")]
    DimensionMismatch {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    /// Display template could not be parsed.
    #[error("Invalid format template \"{template}\": {reason}")]
    InvalidTemplate {
        template: String,
        reason: &'static str,
    },
}

impl UnitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } | Self::InvalidTemplate { .. } => ErrorKind::Configuration,
            Self::UnknownUnit { .. }
            | Self::NotInSystem { .. }
            | Self::NoMainUnit { .. }
            | Self::UnknownSystem { .. }
            | Self::UnknownDimension { .. } => ErrorKind::Lookup,
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
        }
    }

    pub(crate) fn configuration(what: impl Into<String>) -> Self {
        Self::Configuration { what: what.into() }
    }
}
