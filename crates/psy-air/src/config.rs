//! Constructor inputs for an air state.

use serde::{Deserialize, Serialize};

use crate::error::{PsychroError, PsychroResult};

/// Known values supplied when building an air state, in the caller's
/// measurement system. Every field is optional; unset fields are solved.
///
/// Deserializes from the same keywords the loose-pair constructor accepts,
/// including the aliases `P`, `W` and `h`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AirStateConfig {
    /// Elevation above sea level (m, or ft in the imperial system)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, alias = "P", skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Dry-bulb temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdb: Option<f64>,
    /// Wet-bulb temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twb: Option<f64>,
    /// Dew point temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dew: Option<f64>,
    /// Relative humidity, fraction 0-1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rh: Option<f64>,
    /// Humidity ratio, mass water / mass dry air
    #[serde(default, alias = "W", skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(default, alias = "h", skip_serializing_if = "Option::is_none")]
    pub enthalpy: Option<f64>,
}

impl AirStateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loose `(keyword, value)` pairs.
    ///
    /// Unknown keywords are collected and reported together. When both a
    /// keyword and its alias are given (`pressure`/`P`), the full keyword wins.
    pub fn from_pairs<I, K>(pairs: I) -> PsychroResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut config = Self::default();
        let mut aliased = Self::default();
        let mut unknown = Vec::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let slot = match key {
                "elevation" => &mut config.elevation,
                "pressure" => &mut config.pressure,
                "P" => &mut aliased.pressure,
                "tdb" => &mut config.tdb,
                "twb" => &mut config.twb,
                "dew" => &mut config.dew,
                "rh" => &mut config.rh,
                "ratio" => &mut config.ratio,
                "W" => &mut aliased.ratio,
                "enthalpy" => &mut config.enthalpy,
                "h" => &mut aliased.enthalpy,
                _ => {
                    unknown.push(key.to_string());
                    continue;
                }
            };
            *slot = Some(value);
        }

        if !unknown.is_empty() {
            return Err(PsychroError::UnrecognizedParams { names: unknown });
        }
        Ok(aliased.merge(config))
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            elevation: overrides.elevation.or(self.elevation),
            pressure: overrides.pressure.or(self.pressure),
            tdb: overrides.tdb.or(self.tdb),
            twb: overrides.twb.or(self.twb),
            dew: overrides.dew.or(self.dew),
            rh: overrides.rh.or(self.rh),
            ratio: overrides.ratio.or(self.ratio),
            enthalpy: overrides.enthalpy.or(self.enthalpy),
        }
    }

    pub fn with_elevation(mut self, v: f64) -> Self {
        self.elevation = Some(v);
        self
    }

    pub fn with_pressure(mut self, v: f64) -> Self {
        self.pressure = Some(v);
        self
    }

    pub fn with_tdb(mut self, v: f64) -> Self {
        self.tdb = Some(v);
        self
    }

    pub fn with_twb(mut self, v: f64) -> Self {
        self.twb = Some(v);
        self
    }

    pub fn with_dew(mut self, v: f64) -> Self {
        self.dew = Some(v);
        self
    }

    pub fn with_rh(mut self, v: f64) -> Self {
        self.rh = Some(v);
        self
    }

    pub fn with_ratio(mut self, v: f64) -> Self {
        self.ratio = Some(v);
        self
    }

    pub fn with_enthalpy(mut self, v: f64) -> Self {
        self.enthalpy = Some(v);
        self
    }
}
