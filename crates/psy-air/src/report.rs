//! Human-readable summaries of an air state.

use std::fmt::Write;

use psy_units::{Dimension, SystemKind};

use crate::error::PsychroResult;
use crate::property::Field;
use crate::state::{AirState, elevation_unit};

const NOT_CALCULATED: &str = "not calculated";

fn label(field: Field) -> &'static str {
    match field {
        Field::DryBulb => "Dry bulb Temp:  ",
        Field::WetBulb => "Wet bulb Temp:  ",
        Field::DewPoint => "Dew point Temp: ",
        Field::RelativeHumidity => "Rel. Humidity:  ",
        Field::HumidityRatio => "Humidity Ratio: ",
        Field::Enthalpy => "Enthalpy:       ",
    }
}

fn ratio_unit(system: SystemKind) -> &'static str {
    match system {
        SystemKind::Si => "kg(H₂O)/kg(dry air)",
        SystemKind::Imperial => "lb(H₂O)/lb(dry air)",
        SystemKind::Cgs => "g(H₂O)/g(dry air)",
    }
}

impl AirState<'_> {
    /// Multi-line report in the state's measurement system.
    ///
    /// Fields that are not known yet read "not calculated".
    pub fn report(&self) -> PsychroResult<String> {
        let registry = self.registry();
        let system = self.system();

        let mut out = String::from("Psychrometric Instance\n");
        let pressure = registry.render(system, Dimension::Pressure, self.pressure_pa(), None)?;
        let elevation = registry.render(
            system,
            elevation_unit(system),
            self.elevation_m(),
            Some("%f %s o.s.l."),
        )?;
        let _ = writeln!(out, "Air Pressure:   {pressure}");
        let _ = writeln!(out, "Elevation:      {elevation}");

        for field in Field::REPORT_ORDER {
            let text = match self.known(field) {
                None => NOT_CALCULATED.to_string(),
                Some(v) => match field {
                    Field::DryBulb | Field::WetBulb | Field::DewPoint => {
                        registry.render(system, Dimension::Temperature, v, None)?
                    }
                    Field::Enthalpy => registry.render(system, Dimension::Enthalpy, v, None)?,
                    Field::RelativeHumidity => format!("{:.6}%", 100.0 * v),
                    Field::HumidityRatio => format!("{v:.6} {}", ratio_unit(system)),
                },
            };
            let _ = writeln!(out, "{}{text}", label(field));
        }
        Ok(out)
    }

    /// The same report with every value in SI.
    pub fn report_si(&self) -> String {
        let mut out = String::from("Psychrometric Instance (SI)\n");
        let _ = writeln!(out, "Air Pressure:   {:.6} Pa", self.pressure_pa());
        let _ = writeln!(out, "Elevation:      {:.6} m o.s.l.", self.elevation_m());
        for field in Field::REPORT_ORDER {
            let text = match (self.known(field), field) {
                (None, _) => NOT_CALCULATED.to_string(),
                (Some(v), Field::DryBulb | Field::WetBulb | Field::DewPoint) => {
                    format!("{v:.6}°C")
                }
                (Some(v), Field::RelativeHumidity) => format!("{:.6}%", 100.0 * v),
                (Some(v), Field::HumidityRatio) => format!("{v:.6} {}", ratio_unit(SystemKind::Si)),
                (Some(v), Field::Enthalpy) => format!("{v:.6} kJ/kg"),
            };
            let _ = writeln!(out, "{}{text}", label(field));
        }
        out
    }
}
