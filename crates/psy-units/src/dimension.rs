//! Physical dimensions known to the registry.

use crate::UnitError;
use std::fmt;
use std::str::FromStr;

/// Kind of physical quantity. Units are interchangeable only within one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dimension {
    /// Canonical: m
    Length,
    /// Canonical: kg
    Mass,
    /// Canonical: s
    Time,
    /// Canonical: °C
    Temperature,
    /// Canonical: Pa
    Pressure,
    /// Specific enthalpy, canonical: kJ/kg dry air
    Enthalpy,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Self::Length,
        Self::Mass,
        Self::Time,
        Self::Temperature,
        Self::Pressure,
        Self::Enthalpy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Time => "time",
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Enthalpy => "enthalpy",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dimension {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "length" => Ok(Self::Length),
            "mass" => Ok(Self::Mass),
            "time" => Ok(Self::Time),
            "temp" | "temperature" => Ok(Self::Temperature),
            "pressure" => Ok(Self::Pressure),
            "enthalpy" => Ok(Self::Enthalpy),
            _ => Err(UnitError::UnknownDimension {
                name: s.to_string(),
            }),
        }
    }
}
