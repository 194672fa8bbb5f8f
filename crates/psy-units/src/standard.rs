//! The standard unit set used for psychrometric work.

use std::sync::OnceLock;

use crate::{Dimension, SystemKind, UnitRegistry, UnitRegistryBuilder, UnitResult, UnitSpec};

/// Pound-force per square inch, in Pa.
const PSI_PA: f64 = 4.448230531 / (0.0254 * 0.0254);
/// kJ/kg per Btu/lb.
const BTU_PER_LB_KJ_PER_KG: f64 = 1.055056 / 0.45359237;
/// Enthalpy datum shift: 0 Btu/lb is dry air at 0 °F, 0 kJ/kg is dry air at 0 °C.
const BTU_PER_LB_FIX: f64 = 17.88444444444;

impl UnitRegistryBuilder {
    /// Builder pre-populated with the standard SI, Imperial and CGS units.
    ///
    /// Main units: SI m/kg/s/°C/Pa/kJ·kg⁻¹, Imperial in/lb/s/°F/psi/Btu·lb⁻¹,
    /// CGS cm/g/s/°C/bar/erg·g⁻¹.
    pub fn standard() -> UnitResult<Self> {
        use Dimension::*;
        use SystemKind::*;

        let mut b = Self::new();

        b.add_unit(Si, UnitSpec::new("m", Length))?;
        b.add_unit(Si, UnitSpec::new("kg", Mass))?;
        b.add_unit(Si, UnitSpec::new("s", Time))?;
        b.add_unit(
            Si,
            UnitSpec::new("degC", Temperature)
                .symbol("°C")
                .template("%f%s"),
        )?;
        b.add_unit(
            Si,
            UnitSpec::new("kelvin", Temperature)
                .offset(-273.15)
                .symbol("K"),
        )?;
        b.add_unit(Si, UnitSpec::new("pascal", Pressure).symbol("Pa"))?;
        b.add_unit(
            Si,
            UnitSpec::new("kilopascal", Pressure)
                .factor(1000.0)
                .symbol("kPa"),
        )?;
        // The official SI enthalpy unit is J/kg; kJ/kg is the working unit.
        b.add_unit(Si, UnitSpec::new("kJperkg", Enthalpy).symbol("kJ/kg"))?;
        b.add_unit(
            Si,
            UnitSpec::new("Jperkg", Enthalpy)
                .factor(0.001)
                .symbol("J/kg"),
        )?;

        b.add_unit(
            Imperial,
            UnitSpec::new("inch", Length).factor(0.0254).symbol("in"),
        )?;
        b.add_unit(
            Imperial,
            UnitSpec::new("foot", Length).factor(0.3048).symbol("ft"),
        )?;
        b.add_unit(
            Imperial,
            UnitSpec::new("pound", Mass)
                .factor(0.45359237)
                .symbol("lb"),
        )?;
        b.add_unit(Imperial, UnitSpec::alias("s"))?;
        b.add_unit(
            Imperial,
            UnitSpec::new("degF", Temperature)
                .factor(5.0 / 9.0)
                .offset(-32.0)
                .symbol("°F")
                .template("%f%s"),
        )?;
        b.add_unit(Imperial, UnitSpec::new("psi", Pressure).factor(PSI_PA))?;
        b.add_unit(
            Imperial,
            UnitSpec::new("btuperlb", Enthalpy)
                .factor(BTU_PER_LB_KJ_PER_KG)
                .fix(BTU_PER_LB_FIX)
                .symbol("Btu/lb"),
        )?;

        b.add_unit(Cgs, UnitSpec::new("cm", Length).factor(0.01))?;
        b.add_unit(Cgs, UnitSpec::new("g", Mass).factor(0.001))?;
        b.add_unit(Cgs, UnitSpec::alias("s"))?;
        b.add_unit(Cgs, UnitSpec::alias("degC"))?;
        b.add_unit(Cgs, UnitSpec::alias("m"))?;
        b.add_unit(Cgs, UnitSpec::new("bar", Pressure).factor(100_000.0))?;
        b.add_unit(
            Cgs,
            UnitSpec::new("millibar", Pressure)
                .factor(100.0)
                .symbol("mb"),
        )?;
        b.add_unit(
            Cgs,
            UnitSpec::new("ergperg", Enthalpy)
                .factor(1e-7)
                .symbol("erg/g"),
        )?;

        Ok(b)
    }
}

/// Process-wide standard registry, built on first use and immutable afterwards.
pub fn standard_registry() -> &'static UnitRegistry {
    static REGISTRY: OnceLock<UnitRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        UnitRegistryBuilder::standard()
            .expect("standard unit set is valid")
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_builds() {
        let builder = UnitRegistryBuilder::standard();
        assert!(builder.is_ok(), "{:?}", builder.err());
    }

    #[test]
    fn every_system_has_every_dimension() {
        let reg = standard_registry();
        for system in SystemKind::ALL {
            for dimension in Dimension::ALL {
                assert!(
                    reg.main_unit(system, dimension).is_ok(),
                    "{system} lacks a {dimension} unit"
                );
            }
        }
    }

    #[test]
    fn main_units() {
        let reg = standard_registry();
        let main = |s, d| reg.main_unit(s, d).unwrap().name().to_string();
        assert_eq!(main(SystemKind::Si, Dimension::Temperature), "degC");
        assert_eq!(main(SystemKind::Imperial, Dimension::Length), "inch");
        assert_eq!(main(SystemKind::Imperial, Dimension::Pressure), "psi");
        assert_eq!(main(SystemKind::Cgs, Dimension::Length), "cm");
        assert_eq!(main(SystemKind::Cgs, Dimension::Pressure), "bar");
    }

    #[test]
    fn standard_atmosphere_in_psi() {
        let reg = standard_registry();
        let psi = reg
            .from_si(SystemKind::Imperial, Dimension::Pressure, 101_325.0, None)
            .unwrap();
        assert!((psi - 14.696).abs() < 1e-3, "psi = {psi}");
    }

    #[test]
    fn celsius_renders_without_space() {
        let reg = standard_registry();
        let text = reg
            .render(SystemKind::Si, Dimension::Temperature, 21.5, None)
            .unwrap();
        assert_eq!(text, "21.500000°C");
        let text = reg
            .render(SystemKind::Imperial, Dimension::Temperature, 100.0, None)
            .unwrap();
        assert_eq!(text, "212.000000°F");
    }

    #[test]
    fn kelvin_offset() {
        let reg = standard_registry();
        let c = reg.convert("kelvin", 273.15, None).unwrap();
        assert!(c.abs() < 1e-9);
        let f = reg.convert("kelvin", 373.15, Some("degF")).unwrap();
        assert!((f - 212.0).abs() < 1e-9);
    }

    #[test]
    fn standard_builder_can_be_extended() {
        let mut b = UnitRegistryBuilder::standard().unwrap();
        b.add_unit(
            SystemKind::Imperial,
            UnitSpec::new("inHg", Dimension::Pressure)
                .factor(3386.389)
                .symbol("inHg"),
        )
        .unwrap();
        let reg = b.build();
        let pa = reg.convert("inHg", 29.92, Some("pascal")).unwrap();
        assert!((pa - 101_320.8).abs() < 1.0);
    }
}
