// psy-core/src/units.rs

use uom::si::f64::{
    AvailableEnergy as UomAvailableEnergy, Length as UomLength, MassDensity as UomMassDensity,
    Pressure as UomPressure, Ratio as UomRatio, SpecificVolume as UomSpecificVolume,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
/// Specific enthalpy per unit mass of dry air.
pub type SpecEnthalpy = UomAvailableEnergy;
pub type SpecVolume = UomSpecificVolume;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kj_per_kg(v: f64) -> SpecEnthalpy {
    use uom::si::available_energy::kilojoule_per_kilogram;
    SpecEnthalpy::new::<kilojoule_per_kilogram>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn m3_per_kg(v: f64) -> SpecVolume {
    use uom::si::specific_volume::cubic_meter_per_kilogram;
    SpecVolume::new::<cubic_meter_per_kilogram>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

pub mod constants {
    /// Standard sea-level atmosphere.
    pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;
    /// Offset between the Celsius and Kelvin scales.
    pub const KELVIN_OFFSET: f64 = 273.15;
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::thermodynamic_temperature::kelvin;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _l = m(2.0);
        let _h = kj_per_kg(64.0);
        let _rho = kg_per_m3(1.2);
        let _v = m3_per_kg(0.83);
        let _r = unitless(0.5);
    }

    #[test]
    fn celsius_maps_to_kelvin() {
        let t = degc(0.0);
        assert!((t.get::<kelvin>() - constants::KELVIN_OFFSET).abs() < 1e-9);
    }
}
