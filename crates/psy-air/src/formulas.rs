//! Closed-form moist-air correlations.
//!
//! Units throughout: pressure in Pa, temperature in °C, humidity ratio in
//! kg/kg dry air, enthalpy in kJ/kg dry air.
//!
//! Sources: ASHRAE Fundamentals 2005 (SI) and Singh et al., "Numerical
//! calculation of psychrometric properties on a calculator", Building and
//! Environment 37 (2002). Valid only inside the ranges of those sources.

use crate::error::{PsychroError, PsychroResult};
use psy_core::ensure_finite;
use psy_core::units::constants::{KELVIN_OFFSET, STANDARD_PRESSURE_PA};

/// Ratio of molar masses, water vapor / dry air.
pub const MOLAR_MASS_RATIO: f64 = 0.62198;
/// Molar mass ratio used by the dew-point humidity-ratio correlation.
pub const DEW_POINT_MASS_RATIO: f64 = 0.621945;
/// Gas constant of dry air, J/(kg·K).
pub const R_DRY_AIR: f64 = 287.055;

const CP_DRY_AIR: f64 = 1.006;
const CP_VAPOR: f64 = 1.86;
const LATENT_HEAT_0C: f64 = 2501.0;

/// Mean barometric pressure (Pa) at `elevation` metres above sea level.
pub fn mean_pressure(elevation: f64) -> f64 {
    STANDARD_PRESSURE_PA * (1.0 - 2.25577e-5 * elevation).powf(5.25588)
}

/// Elevation (m) whose mean barometric pressure is `pressure`.
pub fn altitude(pressure: f64) -> f64 {
    (1.0 - (pressure / STANDARD_PRESSURE_PA).powf(1.0 / 5.25588)) / 2.25577e-5
}

/// Saturation vapor pressure (Pa) over liquid water, `t_k` in Kelvin.
pub fn saturation_pressure_over_water(t_k: f64) -> f64 {
    let lp = 1.3914993 - 5800.2206 / t_k - 0.048640239 * t_k + 0.000041764768 * t_k.powi(2)
        - 0.000000014452093 * t_k.powi(3)
        + 6.5459673 * t_k.ln();
    lp.exp()
}

/// Saturation vapor pressure (Pa) over ice, `t_k` in Kelvin.
pub fn saturation_pressure_over_ice(t_k: f64) -> f64 {
    let lp = 6.3925247 - 5674.5359 / t_k - 0.009677843 * t_k + 0.00000062215701 * t_k.powi(2)
        + 2.0747825e-09 * t_k.powi(3)
        - 9.484024e-13 * t_k.powi(4)
        + 4.1635019 * t_k.ln();
    lp.exp()
}

/// Saturation vapor pressure (Pa) at `t` °C; water branch at or above 0 °C, ice below.
pub fn saturation_pressure(t: f64) -> f64 {
    let t_k = t + KELVIN_OFFSET;
    if t_k >= KELVIN_OFFSET {
        saturation_pressure_over_water(t_k)
    } else {
        saturation_pressure_over_ice(t_k)
    }
}

/// Partial vapor pressure (Pa) for air pressure `p` and humidity ratio `w`.
pub fn vapor_pressure(p: f64, w: f64) -> f64 {
    p * w / (MOLAR_MASS_RATIO + w)
}

/// `ratio * pv / (p - pv)`, rejecting a non-positive denominator.
fn ratio_from_partial(ratio: f64, pv: f64, p: f64, what: &str) -> PsychroResult<f64> {
    let dry = p - pv;
    if dry <= 0.0 {
        return Err(PsychroError::domain(format!(
            "{what}: vapor pressure {pv:.3} Pa is not below air pressure {p:.3} Pa"
        )));
    }
    Ok(ensure_finite(ratio * pv / dry, "humidity ratio")?)
}

/// Saturation humidity ratio at `t` °C.
pub fn saturation_humidity_ratio(t: f64, p: f64) -> PsychroResult<f64> {
    ratio_from_partial(
        MOLAR_MASS_RATIO,
        saturation_pressure(t),
        p,
        "saturation humidity ratio",
    )
}

/// Humidity ratio from dry-bulb `t` and wet-bulb `tw`.
///
/// The latent-heat constants switch to the ice-bulb set below 0 °C dry bulb.
pub fn humidity_ratio_from_wet_bulb(t: f64, tw: f64, p: f64) -> PsychroResult<f64> {
    let ws = saturation_humidity_ratio(tw, p)?;
    let w = if t >= 0.0 {
        ((2501.0 - 2.326 * tw) * ws - 1.006 * (t - tw)) / (2501.0 + 1.86 * t - 4.186 * tw)
    } else {
        ((2830.0 - 0.24 * tw) * ws - 1.006 * (t - tw)) / (2830.0 + 1.86 * t - 2.1 * tw)
    };
    Ok(ensure_finite(w, "humidity ratio")?)
}

/// Humidity ratio from dry-bulb `t` and relative humidity `rh` (fraction).
pub fn humidity_ratio_from_rh(t: f64, rh: f64, p: f64) -> PsychroResult<f64> {
    ratio_from_partial(
        MOLAR_MASS_RATIO,
        rh * saturation_pressure(t),
        p,
        "humidity ratio from relative humidity",
    )
}

/// Humidity ratio from dew point `tdew`.
pub fn humidity_ratio_from_dew_point(tdew: f64, p: f64) -> PsychroResult<f64> {
    ratio_from_partial(
        DEW_POINT_MASS_RATIO,
        saturation_pressure(tdew),
        p,
        "humidity ratio from dew point",
    )
}

/// Humidity ratio from dry-bulb `t` and enthalpy `h`.
pub fn humidity_ratio_from_enthalpy(t: f64, h: f64) -> f64 {
    (h - CP_DRY_AIR * t) / (LATENT_HEAT_0C + CP_VAPOR * t)
}

/// Dry-bulb temperature from enthalpy `h` and humidity ratio `w`.
pub fn dry_bulb_from_enthalpy(h: f64, w: f64) -> f64 {
    (h - LATENT_HEAT_0C * w) / (CP_DRY_AIR + CP_VAPOR * w)
}

/// Enthalpy of moist air.
pub fn enthalpy(t: f64, w: f64) -> f64 {
    CP_DRY_AIR * t + w * (LATENT_HEAT_0C + CP_VAPOR * t)
}

/// Relative humidity from dry-bulb and wet-bulb temperatures.
pub fn relative_humidity_from_wet_bulb(t: f64, tw: f64, p: f64) -> PsychroResult<f64> {
    let w = humidity_ratio_from_wet_bulb(t, tw, p)?;
    Ok(relative_humidity_from_humidity_ratio(t, w, p))
}

/// Relative humidity from dry-bulb and dew-point temperatures.
pub fn relative_humidity_from_dew_point(t: f64, tdew: f64) -> f64 {
    saturation_pressure(tdew) / saturation_pressure(t)
}

/// Relative humidity from dry-bulb and humidity ratio.
pub fn relative_humidity_from_humidity_ratio(t: f64, w: f64, p: f64) -> f64 {
    vapor_pressure(p, w) / saturation_pressure(t)
}

/// Relative-humidity estimate from dry-bulb and enthalpy.
///
/// Reuses the humidity-ratio-from-enthalpy expression as is, so the result
/// is a humidity ratio rather than a vapor pressure ratio. `AirState` never
/// uses it: with enthalpy as the only moisture input it derives the humidity
/// ratio first and takes RH from that.
pub fn relative_humidity_from_enthalpy(t: f64, h: f64) -> f64 {
    humidity_ratio_from_enthalpy(t, h)
}

/// Dew point (°C) from air pressure and humidity ratio.
///
/// Fails for `w <= 0`: bone-dry air has no dew point.
pub fn dew_point(p: f64, w: f64) -> PsychroResult<f64> {
    let pw = vapor_pressure(p, w);
    if pw.is_nan() || pw <= 0.0 {
        return Err(PsychroError::domain(format!(
            "dew point needs a positive vapor pressure (humidity ratio {w})"
        )));
    }
    let a = (pw / 1125.0).ln();
    let d1 = 6.54 + 14.526 * a + 0.7389 * a.powi(2) + 0.09486 * a.powi(3) + 0.4569 * pw.powf(0.1984);
    let d = if d1 >= 0.0 {
        d1
    } else {
        6.09 + 12.608 * a + 0.4959 * a.powi(2)
    };
    Ok(ensure_finite(d, "dew point")?)
}

/// Density of the dry-air component, kg dry air per m³.
pub fn dry_air_density(p: f64, t: f64, w: f64) -> f64 {
    p / (R_DRY_AIR * (t + KELVIN_OFFSET) * (1.0 + w / MOLAR_MASS_RATIO))
}

/// Specific volume, m³ per kg dry air.
pub fn specific_volume(p: f64, t: f64, w: f64) -> f64 {
    1.0 / dry_air_density(p, t, w)
}

/// Density of moist air (dry air plus vapor), kg/m³.
pub fn moist_air_density(p: f64, t: f64, w: f64) -> f64 {
    (1.0 + w) * dry_air_density(p, t, w)
}

/// Degree of saturation, W / Ws(t).
pub fn degree_of_saturation(t: f64, w: f64, p: f64) -> PsychroResult<f64> {
    let ws = saturation_humidity_ratio(t, p)?;
    Ok(w / ws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psy_core::ErrorKind;

    const P0: f64 = 101_325.0;

    #[test]
    fn saturation_pressure_reference_points() {
        // ASHRAE table: 20 °C -> 2.3389 kPa, -10 °C -> 0.25990 kPa, 100 °C -> ~101.42 kPa
        assert!((saturation_pressure(20.0) - 2338.8).abs() < 1.0);
        assert!((saturation_pressure(-10.0) - 259.90).abs() < 0.1);
        assert!((saturation_pressure(100.0) - 101_418.7).abs() < 10.0);
    }

    #[test]
    fn saturation_pressure_branches_meet_at_triple_point() {
        let t_k = KELVIN_OFFSET;
        let water = saturation_pressure_over_water(t_k);
        let ice = saturation_pressure_over_ice(t_k);
        // The two published fits differ by about 1e-4 relative at 0 °C.
        assert!(((water - ice) / water).abs() < 2e-4);
        assert_eq!(saturation_pressure(0.0), water);
        assert_eq!(saturation_pressure(-1e-9), saturation_pressure_over_ice(t_k - 1e-9));
    }

    #[test]
    fn humidity_ratio_from_rh_reference() {
        let w = humidity_ratio_from_rh(30.0, 0.5, P0).unwrap();
        assert!((w - 0.013311).abs() < 1e-5, "w = {w}");
    }

    #[test]
    fn humidity_ratio_from_wet_bulb_reference() {
        let w = humidity_ratio_from_wet_bulb(30.0, 22.0, P0).unwrap();
        assert!((w - 0.013304).abs() < 1e-5, "w = {w}");

        let w = humidity_ratio_from_wet_bulb(-10.0, -11.0, P0).unwrap();
        assert!((w - 0.001107).abs() < 1e-5, "w = {w}");
    }

    #[test]
    fn saturated_air_has_wet_bulb_equal_to_dry_bulb() {
        let ws = saturation_humidity_ratio(25.0, P0).unwrap();
        let w = humidity_ratio_from_wet_bulb(25.0, 25.0, P0).unwrap();
        assert!((w - ws).abs() < 1e-12);
    }

    #[test]
    fn enthalpy_and_dry_bulb_are_inverse() {
        let h = enthalpy(30.0, 0.013311);
        assert!((h - 64.21).abs() < 0.01, "h = {h}");
        assert!((dry_bulb_from_enthalpy(h, 0.013311) - 30.0).abs() < 1e-9);
        assert!((humidity_ratio_from_enthalpy(30.0, h) - 0.013311).abs() < 1e-12);
    }

    #[test]
    fn relative_humidity_paths_agree() {
        let w = humidity_ratio_from_rh(30.0, 0.5, P0).unwrap();
        let rh = relative_humidity_from_humidity_ratio(30.0, w, P0);
        assert!((rh - 0.5).abs() < 1e-12);

        let rh = relative_humidity_from_dew_point(30.0, 30.0);
        assert!((rh - 1.0).abs() < 1e-12);
    }

    #[test]
    fn dew_point_reference() {
        let d = dew_point(P0, 0.013311).unwrap();
        assert!((d - 18.18).abs() < 0.05, "dew = {d}");
    }

    #[test]
    fn dew_point_uses_low_temperature_branch() {
        let w = humidity_ratio_from_rh(-10.0, 0.8, P0).unwrap();
        let d = dew_point(P0, w).unwrap();
        assert!(d < -10.0 && d > -16.0, "dew = {d}");
    }

    #[test]
    fn dew_point_of_dry_air_is_domain_error() {
        let err = dew_point(P0, 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(dew_point(P0, -0.001).is_err());
    }

    #[test]
    fn vapor_pressure_at_or_above_air_pressure_is_domain_error() {
        // 100 °C saturated air at half an atmosphere boils.
        let err = humidity_ratio_from_rh(100.0, 1.0, 50_000.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn densities() {
        let w = 0.013311;
        let rho = dry_air_density(P0, 30.0, w);
        assert!((rho - 1.1400).abs() < 1e-3, "rho = {rho}");
        assert!((specific_volume(P0, 30.0, w) * rho - 1.0).abs() < 1e-12);
        assert!(moist_air_density(P0, 30.0, w) > rho);
    }

    #[test]
    fn degree_of_saturation_reference() {
        let w = humidity_ratio_from_rh(30.0, 0.5, P0).unwrap();
        let mu = degree_of_saturation(30.0, w, P0).unwrap();
        assert!((mu - 0.4893).abs() < 1e-3, "mu = {mu}");
    }

    #[test]
    fn barometric_formula_round_trip() {
        assert_eq!(mean_pressure(0.0), P0);
        let p = mean_pressure(1000.0);
        assert!((p - 89_874.6).abs() < 1.0, "p = {p}");
        assert!((altitude(p) - 1000.0).abs() < 1e-6);
        assert!(altitude(P0).abs() < 1e-9);
    }
}
