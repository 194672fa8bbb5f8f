//! Partially known moist-air state and its solver.

use psy_core::units::{
    Density, Length, Pressure, Ratio, SpecEnthalpy, SpecVolume, Temperature, degc, kg_per_m3,
    kj_per_kg, m, m3_per_kg, pa, unitless,
};
use psy_units::{Dimension, SystemKind, UnitRegistry, standard_registry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AirStateConfig;
use crate::error::{PsychroError, PsychroResult};
use crate::formulas;
use crate::property::{Field, Property};
use crate::wet_bulb::{WetBulbConfig, solve_wet_bulb};

/// Unit in which each system states elevation.
pub(crate) fn elevation_unit(system: SystemKind) -> &'static str {
    match system {
        SystemKind::Imperial => "foot",
        SystemKind::Si | SystemKind::Cgs => "m",
    }
}

/// Moisture values supplied at construction, in SI.
///
/// Derivations pick their source from these rather than from cached results,
/// so a field comes out the same whatever order fields are queried in.
#[derive(Debug, Clone, Copy)]
struct Given {
    twb: Option<f64>,
    dew: Option<f64>,
    rh: Option<f64>,
    enthalpy: Option<f64>,
}

/// Moist air at one pressure with some of its six psychrometric fields known.
///
/// Values are stored in SI (Pa, m, °C, kJ/kg). Solving a field caches it, so
/// later queries return the stored value without recomputation.
#[derive(Debug, Clone)]
pub struct AirState<'r> {
    registry: &'r UnitRegistry,
    system: SystemKind,
    wet_bulb: WetBulbConfig,
    pressure: f64,
    elevation: f64,
    given: Given,
    tdb: Option<f64>,
    twb: Option<f64>,
    dew: Option<f64>,
    rh: Option<f64>,
    ratio: Option<f64>,
    enthalpy: Option<f64>,
}

impl AirState<'static> {
    /// Build against the process-wide standard unit registry.
    pub fn standard(system: SystemKind, config: &AirStateConfig) -> PsychroResult<Self> {
        Self::new(standard_registry(), system, config)
    }
}

impl<'r> AirState<'r> {
    /// Build a state from values expressed in `system`.
    ///
    /// Pressure wins over elevation when both are given; the elevation is then
    /// recomputed from the pressure. With neither, sea level is assumed.
    pub fn new(
        registry: &'r UnitRegistry,
        system: SystemKind,
        config: &AirStateConfig,
    ) -> PsychroResult<Self> {
        let finite = |what: &'static str, v: Option<f64>| -> PsychroResult<Option<f64>> {
            match v {
                Some(value) if !value.is_finite() => {
                    Err(PsychroError::InvalidInput { what, value })
                }
                other => Ok(other),
            }
        };
        let to_si = |dimension: Dimension, v: Option<f64>| -> PsychroResult<Option<f64>> {
            v.map(|value| registry.to_si(system, dimension, value, None))
                .transpose()
                .map_err(PsychroError::from)
        };

        let elevation = finite("elevation", config.elevation)?
            .map(|e| registry.to_si(system, Dimension::Length, e, Some(elevation_unit(system))))
            .transpose()?;
        let pressure = match to_si(Dimension::Pressure, finite("pressure", config.pressure)?)? {
            Some(p) => p,
            None => formulas::mean_pressure(elevation.unwrap_or(0.0)),
        };
        if !pressure.is_finite() || pressure <= 0.0 {
            return Err(PsychroError::domain(format!(
                "air pressure must be positive, got {pressure} Pa"
            )));
        }
        let elevation = match (config.pressure, elevation) {
            (None, Some(e)) => e,
            _ => formulas::altitude(pressure),
        };

        let rh = finite("rh", config.rh)?;
        if let Some(rh) = rh {
            if !(0.0..=1.0).contains(&rh) {
                return Err(PsychroError::domain(format!(
                    "relative humidity {rh} is outside 0..1"
                )));
            }
        }
        let ratio = finite("ratio", config.ratio)?;
        if let Some(w) = ratio {
            if w < 0.0 {
                return Err(PsychroError::domain(format!(
                    "humidity ratio {w} is negative"
                )));
            }
        }

        let given = Given {
            twb: to_si(Dimension::Temperature, finite("twb", config.twb)?)?,
            dew: to_si(Dimension::Temperature, finite("dew", config.dew)?)?,
            rh,
            enthalpy: to_si(Dimension::Enthalpy, finite("enthalpy", config.enthalpy)?)?,
        };
        let state = Self {
            registry,
            system,
            wet_bulb: WetBulbConfig::default(),
            pressure,
            elevation,
            given,
            tdb: to_si(Dimension::Temperature, finite("tdb", config.tdb)?)?,
            twb: given.twb,
            dew: given.dew,
            rh,
            ratio,
            enthalpy: given.enthalpy,
        };

        if !state.dry_bulb_resolvable() {
            return Err(PsychroError::Unsolvable {
                field: Field::DryBulb,
            });
        }
        debug!(
            system = %system,
            pressure = state.pressure,
            elevation = state.elevation,
            "air state created"
        );
        Ok(state)
    }

    /// Replace the wet-bulb iteration settings.
    pub fn with_wet_bulb_config(mut self, config: WetBulbConfig) -> Self {
        self.wet_bulb = config;
        self
    }

    pub fn system(&self) -> SystemKind {
        self.system
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    pub fn wet_bulb_config(&self) -> &WetBulbConfig {
        &self.wet_bulb
    }

    /// Air pressure, Pa.
    pub fn pressure_pa(&self) -> f64 {
        self.pressure
    }

    /// Elevation above sea level, m.
    pub fn elevation_m(&self) -> f64 {
        self.elevation
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.pressure)
    }

    pub fn elevation(&self) -> Length {
        m(self.elevation)
    }

    /// A temperature field, if known. `None` for non-temperature fields.
    pub fn temperature(&self, field: Field) -> Option<Temperature> {
        if field.is_temperature() {
            self.known(field).map(degc)
        } else {
            None
        }
    }

    pub fn relative_humidity(&self) -> Option<Ratio> {
        self.rh.map(unitless)
    }

    pub fn specific_enthalpy(&self) -> Option<SpecEnthalpy> {
        self.enthalpy.map(kj_per_kg)
    }

    /// Specific volume, solving whatever it needs.
    pub fn specific_volume(&mut self) -> PsychroResult<SpecVolume> {
        self.solve_property(Property::SpecificVolume).map(m3_per_kg)
    }

    /// Density of the dry-air component, solving whatever it needs.
    pub fn dry_air_density(&mut self) -> PsychroResult<Density> {
        self.solve_property(Property::DryAirDensity).map(kg_per_m3)
    }

    /// Current SI value of a field, without solving.
    pub fn known(&self, field: Field) -> Option<f64> {
        match field {
            Field::DryBulb => self.tdb,
            Field::WetBulb => self.twb,
            Field::DewPoint => self.dew,
            Field::RelativeHumidity => self.rh,
            Field::HumidityRatio => self.ratio,
            Field::Enthalpy => self.enthalpy,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<f64> {
        match field {
            Field::DryBulb => &mut self.tdb,
            Field::WetBulb => &mut self.twb,
            Field::DewPoint => &mut self.dew,
            Field::RelativeHumidity => &mut self.rh,
            Field::HumidityRatio => &mut self.ratio,
            Field::Enthalpy => &mut self.enthalpy,
        }
    }

    fn dry_bulb_resolvable(&self) -> bool {
        self.tdb.is_some() || (self.enthalpy.is_some() && self.ratio.is_some())
    }

    /// Whether every field can be derived: dry bulb is reachable and at least
    /// one moisture field is known.
    pub fn is_solvable(&self) -> bool {
        self.pressure > 0.0
            && self.dry_bulb_resolvable()
            && [
                self.enthalpy,
                self.ratio,
                self.twb,
                self.dew,
                self.rh,
            ]
            .iter()
            .any(Option::is_some)
    }

    /// Dry-bulb temperature, recovered from enthalpy and humidity ratio when
    /// it was not given.
    pub fn drybulb(&mut self) -> Option<f64> {
        self.solve_dry_bulb().ok()
    }

    /// Solve a property by name (`tdb`, `w`, `dp`, `pw`, ...), case-insensitive.
    pub fn solve(&mut self, name: &str) -> PsychroResult<f64> {
        let property: Property = name.parse()?;
        self.solve_property(property)
    }

    /// Solve a stored field or compute a derived property.
    ///
    /// Derived properties are not cached; their inputs are.
    pub fn solve_property(&mut self, property: Property) -> PsychroResult<f64> {
        let p = self.pressure;
        let value = match property {
            Property::Field(field) => return self.solve_field(field),
            Property::VaporPressure => formulas::vapor_pressure(p, self.solve_humidity_ratio()?),
            Property::DegreeOfSaturation => {
                let (t, w) = self.dry_bulb_and_ratio()?;
                formulas::degree_of_saturation(t, w, p)?
            }
            Property::SpecificVolume => {
                let (t, w) = self.dry_bulb_and_ratio()?;
                formulas::specific_volume(p, t, w)
            }
            Property::DryAirDensity => {
                let (t, w) = self.dry_bulb_and_ratio()?;
                formulas::dry_air_density(p, t, w)
            }
            Property::MoistAirDensity => {
                let (t, w) = self.dry_bulb_and_ratio()?;
                formulas::moist_air_density(p, t, w)
            }
        };
        debug!(property = %property, value, "derived property");
        Ok(value)
    }

    fn dry_bulb_and_ratio(&mut self) -> PsychroResult<(f64, f64)> {
        Ok((self.solve_dry_bulb()?, self.solve_humidity_ratio()?))
    }

    pub fn solve_field(&mut self, field: Field) -> PsychroResult<f64> {
        match field {
            Field::DryBulb => self.solve_dry_bulb(),
            Field::WetBulb => self.solve_wet_bulb(),
            Field::DewPoint => self.solve_dew_point(),
            Field::RelativeHumidity => self.solve_relative_humidity(),
            Field::HumidityRatio => self.solve_humidity_ratio(),
            Field::Enthalpy => self.solve_enthalpy(),
        }
    }

    /// Resolve every unknown field.
    ///
    /// Fails on the first field that cannot be derived, or when the humidity
    /// ratio comes out negative. The state is left untouched on failure.
    pub fn solve_all(&mut self) -> PsychroResult<()> {
        let mut work = self.clone();
        for field in Field::SOLVE_ORDER {
            let value = work.solve_field(field)?;
            if field == Field::HumidityRatio && value < 0.0 {
                return Err(PsychroError::domain(format!(
                    "humidity ratio is negative ({value}); the known values are inconsistent"
                )));
            }
        }
        *self = work;
        Ok(())
    }

    /// A known field converted into the state's measurement system.
    pub fn value_in_system(&self, field: Field) -> PsychroResult<Option<f64>> {
        let Some(value) = self.known(field) else {
            return Ok(None);
        };
        let dimension = match field {
            Field::DryBulb | Field::WetBulb | Field::DewPoint => Dimension::Temperature,
            Field::Enthalpy => Dimension::Enthalpy,
            Field::RelativeHumidity | Field::HumidityRatio => return Ok(Some(value)),
        };
        Ok(Some(
            self.registry.from_si(self.system, dimension, value, None)?,
        ))
    }

    /// Serializable copy of the current SI values.
    pub fn snapshot(&self) -> AirSnapshot {
        AirSnapshot {
            system: self.system,
            pressure: self.pressure,
            elevation: self.elevation,
            tdb: self.tdb,
            twb: self.twb,
            dew: self.dew,
            rh: self.rh,
            ratio: self.ratio,
            enthalpy: self.enthalpy,
        }
    }

    fn store(&mut self, field: Field, path: &'static str, value: f64) -> f64 {
        debug!(field = field.key(), path, value, "derived");
        *self.slot(field) = Some(value);
        value
    }

    fn solve_dry_bulb(&mut self) -> PsychroResult<f64> {
        if let Some(t) = self.tdb {
            return Ok(t);
        }
        match (self.enthalpy, self.ratio) {
            (Some(h), Some(w)) => {
                let t = formulas::dry_bulb_from_enthalpy(h, w);
                Ok(self.store(Field::DryBulb, "enthalpy", t))
            }
            _ => Err(PsychroError::Unsolvable {
                field: Field::DryBulb,
            }),
        }
    }

    fn solve_humidity_ratio(&mut self) -> PsychroResult<f64> {
        if let Some(w) = self.ratio {
            return Ok(w);
        }
        let t = self.solve_dry_bulb()?;
        let p = self.pressure;
        let given = self.given;
        let (path, w) = if let Some(tw) = given.twb {
            ("wet_bulb", formulas::humidity_ratio_from_wet_bulb(t, tw, p)?)
        } else if let Some(tdew) = given.dew {
            ("dew_point", formulas::humidity_ratio_from_dew_point(tdew, p)?)
        } else if let Some(rh) = given.rh {
            ("relative_humidity", formulas::humidity_ratio_from_rh(t, rh, p)?)
        } else if let Some(h) = given.enthalpy {
            ("enthalpy", formulas::humidity_ratio_from_enthalpy(t, h))
        } else {
            return Err(PsychroError::Unsolvable {
                field: Field::HumidityRatio,
            });
        };
        Ok(self.store(Field::HumidityRatio, path, w))
    }

    fn solve_enthalpy(&mut self) -> PsychroResult<f64> {
        if let Some(h) = self.enthalpy {
            return Ok(h);
        }
        let t = self.solve_dry_bulb()?;
        let w = self.solve_humidity_ratio()?;
        Ok(self.store(Field::Enthalpy, "dry_bulb", formulas::enthalpy(t, w)))
    }

    fn solve_relative_humidity(&mut self) -> PsychroResult<f64> {
        if let Some(rh) = self.rh {
            return Ok(rh);
        }
        let t = self.solve_dry_bulb()?;
        let p = self.pressure;
        // With enthalpy as the only moisture input, RH goes through the
        // humidity ratio; the enthalpy expression itself is not an RH.
        let (path, rh) = if let Some(tw) = self.given.twb {
            (
                "wet_bulb",
                formulas::relative_humidity_from_wet_bulb(t, tw, p)?,
            )
        } else if let Some(tdew) = self.given.dew {
            (
                "dew_point",
                formulas::relative_humidity_from_dew_point(t, tdew),
            )
        } else {
            let w = self.solve_humidity_ratio().map_err(|e| match e {
                PsychroError::Unsolvable { .. } => PsychroError::Unsolvable {
                    field: Field::RelativeHumidity,
                },
                other => other,
            })?;
            (
                "humidity_ratio",
                formulas::relative_humidity_from_humidity_ratio(t, w, p),
            )
        };
        let rh = psy_core::ensure_finite(rh, "relative humidity")?;
        Ok(self.store(Field::RelativeHumidity, path, rh))
    }

    fn solve_dew_point(&mut self) -> PsychroResult<f64> {
        if let Some(d) = self.dew {
            return Ok(d);
        }
        let w = self.solve_humidity_ratio()?;
        let d = formulas::dew_point(self.pressure, w)?;
        Ok(self.store(Field::DewPoint, "humidity_ratio", d))
    }

    fn solve_wet_bulb(&mut self) -> PsychroResult<f64> {
        if let Some(tw) = self.twb {
            return Ok(tw);
        }
        let t = self.solve_dry_bulb()?;
        let rh = self.solve_relative_humidity()?;
        let solution = solve_wet_bulb(t, rh, self.pressure, &self.wet_bulb)?;
        Ok(self.store(Field::WetBulb, "relative_humidity", solution.temperature))
    }
}

/// SI values of an air state, for machine-readable output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirSnapshot {
    pub system: SystemKind,
    /// Pa
    pub pressure: f64,
    /// m
    pub elevation: f64,
    pub tdb: Option<f64>,
    pub twb: Option<f64>,
    pub dew: Option<f64>,
    pub rh: Option<f64>,
    pub ratio: Option<f64>,
    /// kJ/kg dry air
    pub enthalpy: Option<f64>,
}
