//! Names of the quantities an air state can report.

use crate::error::PsychroError;
use std::fmt;
use std::str::FromStr;

/// The six stored psychrometric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// °C
    DryBulb,
    /// °C
    WetBulb,
    /// °C
    DewPoint,
    /// Fraction 0-1
    RelativeHumidity,
    /// kg water / kg dry air
    HumidityRatio,
    /// kJ/kg dry air
    Enthalpy,
}

impl Field {
    /// Order in which `solve_all` resolves fields.
    pub const SOLVE_ORDER: [Field; 6] = [
        Self::DryBulb,
        Self::HumidityRatio,
        Self::Enthalpy,
        Self::RelativeHumidity,
        Self::DewPoint,
        Self::WetBulb,
    ];

    /// Order used by reports.
    pub const REPORT_ORDER: [Field; 6] = [
        Self::DryBulb,
        Self::WetBulb,
        Self::DewPoint,
        Self::RelativeHumidity,
        Self::HumidityRatio,
        Self::Enthalpy,
    ];

    /// Short keyword, as accepted by the constructor.
    pub fn key(self) -> &'static str {
        match self {
            Self::DryBulb => "tdb",
            Self::WetBulb => "twb",
            Self::DewPoint => "dew",
            Self::RelativeHumidity => "rh",
            Self::HumidityRatio => "ratio",
            Self::Enthalpy => "enthalpy",
        }
    }

    pub fn is_temperature(self) -> bool {
        matches!(self, Self::DryBulb | Self::WetBulb | Self::DewPoint)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DryBulb => "Dry bulb temperature",
            Self::WetBulb => "Wet bulb temperature",
            Self::DewPoint => "Dew point temperature",
            Self::RelativeHumidity => "Relative humidity",
            Self::HumidityRatio => "Humidity ratio",
            Self::Enthalpy => "Enthalpy",
        };
        write!(f, "{s}")
    }
}

/// Anything `solve` can be asked for: a stored field or a quantity derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Field(Field),
    /// Partial water vapor pressure, Pa
    VaporPressure,
    /// W / Ws at the dry-bulb temperature
    DegreeOfSaturation,
    /// m³ / kg dry air
    SpecificVolume,
    /// kg dry air / m³
    DryAirDensity,
    /// kg moist air / m³
    MoistAirDensity,
}

impl Property {
    pub fn field(self) -> Option<Field> {
        match self {
            Self::Field(f) => Some(f),
            _ => None,
        }
    }
}

impl From<Field> for Property {
    fn from(f: Field) -> Self {
        Self::Field(f)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{field}"),
            Self::VaporPressure => write!(f, "Vapor pressure"),
            Self::DegreeOfSaturation => write!(f, "Degree of saturation"),
            Self::SpecificVolume => write!(f, "Specific volume"),
            Self::DryAirDensity => write!(f, "Dry air density"),
            Self::MoistAirDensity => write!(f, "Moist air density"),
        }
    }
}

impl FromStr for Property {
    type Err = PsychroError;

    /// Case-insensitive, with the usual psychrometric abbreviations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let p = match s.trim().to_lowercase().as_str() {
            "tdb" | "drybulb" | "dry_bulb" => Self::Field(Field::DryBulb),
            "twb" | "wetbulb" | "wet_bulb" => Self::Field(Field::WetBulb),
            "dp" | "dew" | "tdp" | "dewpoint" | "dew_point" => Self::Field(Field::DewPoint),
            "rh" => Self::Field(Field::RelativeHumidity),
            "w" | "ratio" => Self::Field(Field::HumidityRatio),
            "h" | "enthalpy" => Self::Field(Field::Enthalpy),
            "pw" | "wvp" => Self::VaporPressure,
            "dsat" => Self::DegreeOfSaturation,
            "sv" => Self::SpecificVolume,
            "rda" => Self::DryAirDensity,
            "mad" => Self::MoistAirDensity,
            _ => {
                return Err(PsychroError::UnknownProperty {
                    name: s.to_string(),
                });
            }
        };
        Ok(p)
    }
}
